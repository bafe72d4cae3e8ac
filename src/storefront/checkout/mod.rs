//! # Checkout
//!
//! A three-step wizard for buying one template:
//!
//! ```text
//! CollectingInfo ──next()──▶ CollectingPayment ──submit_payment()──▶ Confirmed
//!        ▲                          │
//!        └─────────back()───────────┘
//! ```
//!
//! Each forward move validates the fields of the step being left; a failed
//! validation leaves the wizard where it was and records the field errors.
//! `Confirmed` is terminal.
//!
//! Charging is delegated to a [`PaymentProcessor`](payment::PaymentProcessor),
//! so the same wizard runs against the simulated processor in production and a
//! failing one in tests.

use crate::error::{Result, StorefrontError};
use crate::model::{CatalogEntry, CustomerInfo, OrderRecord, PaymentInfo};
use crate::validation::{validate_customer, validate_payment, ValidationReport};
use rust_decimal::Decimal;
use std::fmt;
use tracing::{info, warn};

pub mod payment;

use payment::{amount_with_tax, PaymentProcessor, PaymentRequest};

/// Default sales tax applied on top of the list price.
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    CollectingInfo,
    CollectingPayment,
    Confirmed,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CheckoutStep::CollectingInfo => "customer info",
            CheckoutStep::CollectingPayment => "payment",
            CheckoutStep::Confirmed => "confirmed",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
pub struct Checkout {
    entry: CatalogEntry,
    tax_rate: Decimal,
    step: CheckoutStep,
    customer: CustomerInfo,
    payment: PaymentInfo,
    errors: ValidationReport,
    order: Option<OrderRecord>,
}

impl Checkout {
    pub fn new(entry: CatalogEntry, tax_rate: Decimal) -> Self {
        Self {
            entry,
            tax_rate,
            step: CheckoutStep::CollectingInfo,
            customer: CustomerInfo::default(),
            payment: PaymentInfo::default(),
            errors: ValidationReport::default(),
            order: None,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    /// Field errors from the last failed transition.
    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    pub fn order(&self) -> Option<&OrderRecord> {
        self.order.as_ref()
    }

    pub fn subtotal(&self) -> Decimal {
        self.entry.price
    }

    pub fn total(&self) -> Decimal {
        amount_with_tax(self.entry.price, self.tax_rate)
    }

    pub fn tax(&self) -> Decimal {
        self.total() - self.subtotal()
    }

    pub fn set_customer(&mut self, customer: CustomerInfo) -> Result<()> {
        self.expect_step(CheckoutStep::CollectingInfo, "edit customer info")?;
        self.customer = customer;
        Ok(())
    }

    pub fn set_payment(&mut self, payment: PaymentInfo) -> Result<()> {
        self.expect_step(CheckoutStep::CollectingPayment, "edit payment info")?;
        self.payment = payment;
        Ok(())
    }

    /// Customer info → payment, once the contact fields validate.
    pub fn next(&mut self) -> Result<CheckoutStep> {
        self.expect_step(CheckoutStep::CollectingInfo, "advance")?;
        self.errors = validate_customer(&self.customer);
        if !self.errors.is_valid() {
            return Err(StorefrontError::Validation(self.errors.clone()));
        }
        self.step = CheckoutStep::CollectingPayment;
        Ok(self.step)
    }

    /// Payment → customer info. Entered card details are kept.
    pub fn back(&mut self) -> Result<CheckoutStep> {
        self.expect_step(CheckoutStep::CollectingPayment, "go back")?;
        self.errors = ValidationReport::default();
        self.step = CheckoutStep::CollectingInfo;
        Ok(self.step)
    }

    /// Charges through `processor` and, on approval, confirms the order.
    /// A declined payment leaves the wizard on the payment step.
    pub async fn submit_payment(&mut self, processor: &dyn PaymentProcessor) -> Result<OrderRecord> {
        self.expect_step(CheckoutStep::CollectingPayment, "submit payment")?;
        self.errors = validate_payment(&self.payment);
        if !self.errors.is_valid() {
            return Err(StorefrontError::Validation(self.errors.clone()));
        }

        let request = PaymentRequest {
            catalog_entry_id: self.entry.id.clone(),
            customer: self.customer.clone(),
            payment: self.payment.clone(),
            amount: self.total(),
        };

        match processor.process(&request).await {
            Ok(order) => {
                info!(order = %order.order_id, entry = %order.catalog_entry_id, amount = %order.amount_charged, "order confirmed");
                self.payment = PaymentInfo::default();
                self.step = CheckoutStep::Confirmed;
                self.order = Some(order.clone());
                Ok(order)
            }
            Err(e) => {
                warn!(entry = %self.entry.id, error = %e, "payment failed");
                Err(e.into())
            }
        }
    }

    fn expect_step(&self, expected: CheckoutStep, action: &'static str) -> Result<()> {
        if self.step != expected {
            return Err(StorefrontError::InvalidTransition {
                from: self.step,
                action,
            });
        }
        Ok(())
    }
}
