use crate::model::{CustomerInfo, OrderRecord, PaymentInfo};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    #[error("card declined: {0}")]
    Declined(String),

    #[error("payment processor unavailable: {0}")]
    Unavailable(String),
}

/// Everything a processor needs to charge for one template.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub catalog_entry_id: String,
    pub customer: CustomerInfo,
    pub payment: PaymentInfo,
    pub amount: Decimal,
}

/// The seam between checkout and whatever takes the money.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn process(&self, request: &PaymentRequest) -> Result<OrderRecord, PaymentError>;
}

/// `price * (1 + tax_rate)`, rounded to cents with halves away from zero.
pub fn amount_with_tax(price: Decimal, tax_rate: Decimal) -> Decimal {
    (price * (Decimal::ONE + tax_rate)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `ORD-<unix millis>-<6 hex chars>`: unique per attempt, sortable by time.
pub fn new_order_id(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "ORD-{}-{}",
        now.timestamp_millis(),
        suffix[..6].to_uppercase()
    )
}

pub fn new_download_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Builds the receipt for a request that has been paid for.
pub fn mint_order(request: &PaymentRequest, now: DateTime<Utc>) -> OrderRecord {
    OrderRecord {
        order_id: new_order_id(now),
        catalog_entry_id: request.catalog_entry_id.clone(),
        customer: request.customer.clone(),
        amount_charged: request.amount,
        download_token: new_download_token(),
        created_at: now,
    }
}

/// Stands in for a real gateway: waits a fixed delay, then always approves.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    delay: Duration,
}

impl SimulatedProcessor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_PROCESSING_DELAY)
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedProcessor {
    async fn process(&self, request: &PaymentRequest) -> Result<OrderRecord, PaymentError> {
        debug!(
            entry = %request.catalog_entry_id,
            card = %request.payment.last_four(),
            delay_ms = self.delay.as_millis() as u64,
            "simulating payment"
        );
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(mint_order(request, Utc::now()))
    }
}

/// Always refuses. For exercising the failure path.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Clone)]
pub struct DeclinedProcessor {
    pub error: PaymentError,
}

#[cfg(any(test, feature = "test_utils"))]
impl DeclinedProcessor {
    pub fn new(reason: &str) -> Self {
        Self {
            error: PaymentError::Declined(reason.to_string()),
        }
    }
}

#[cfg(any(test, feature = "test_utils"))]
#[async_trait]
impl PaymentProcessor for DeclinedProcessor {
    async fn process(&self, _request: &PaymentRequest) -> Result<OrderRecord, PaymentError> {
        Err(self.error.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: Decimal) -> PaymentRequest {
        PaymentRequest {
            catalog_entry_id: "inkwell-blog".into(),
            customer: CustomerInfo {
                email: "ada@example.com".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                country: "UK".into(),
                phone: None,
            },
            payment: PaymentInfo {
                card_number: "4242424242424242".into(),
                expiry: "12/30".into(),
                cvv: "123".into(),
                cardholder_name: "Ada Lovelace".into(),
            },
            amount,
        }
    }

    #[test]
    fn tax_rounds_to_cents() {
        let rate = Decimal::new(10, 2);
        assert_eq!(amount_with_tax(Decimal::new(49, 0), rate), Decimal::new(5390, 2));
        assert_eq!(amount_with_tax(Decimal::new(2999, 2), rate), Decimal::new(3299, 2));
        assert_eq!(amount_with_tax(Decimal::new(5, 2), rate), Decimal::new(6, 2));
        assert_eq!(amount_with_tax(Decimal::new(49, 0), Decimal::ZERO), Decimal::new(49, 0));
    }

    #[test]
    fn order_ids_have_expected_shape() {
        let now = Utc::now();
        let id = new_order_id(now);
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts[0], "ORD");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 6);
        assert_ne!(new_order_id(now), new_order_id(now));
        assert_eq!(new_download_token().len(), 32);
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_processor_waits_then_approves() {
        let processor = SimulatedProcessor::default();
        let start = tokio::time::Instant::now();
        let order = processor.process(&request(Decimal::new(5390, 2))).await.unwrap();

        assert!(start.elapsed() >= DEFAULT_PROCESSING_DELAY);
        assert_eq!(order.amount_charged, Decimal::new(5390, 2));
        assert_eq!(order.catalog_entry_id, "inkwell-blog");
        assert_eq!(order.customer.first_name, "Ada");
    }

    #[tokio::test]
    async fn declined_processor_fails() {
        let processor = DeclinedProcessor::new("insufficient funds");
        let err = processor.process(&request(Decimal::ONE)).await.unwrap_err();
        assert_eq!(err, PaymentError::Declined("insufficient funds".into()));
    }
}
