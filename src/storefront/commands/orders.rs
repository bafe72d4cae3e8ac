use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::orders::OrderLedger;
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};

pub fn show<S: KeyValueStore>(ledger: &OrderLedger<S>, order_id: &str) -> Result<CmdResult> {
    let stored = ledger.get_order(order_id)?;
    Ok(CmdResult::default().with_stored_orders(vec![stored]))
}

pub fn download<S: KeyValueStore>(
    ledger: &OrderLedger<S>,
    token: &str,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let grant = ledger.get_download(token, now)?;
    let mut result = CmdResult::default();
    if grant.download_url.is_none() {
        result.add_message(CmdMessage::warning(
            "This template has no download file attached.",
        ));
    }
    Ok(result.with_download(grant))
}

pub fn for_customer<S: KeyValueStore>(ledger: &OrderLedger<S>, email: &str) -> Result<CmdResult> {
    let orders = ledger.orders_for_email(email)?;
    let mut result = CmdResult::default();
    if orders.is_empty() {
        result.add_message(CmdMessage::info(format!("No orders for {}", email.trim())));
    }
    Ok(result.with_stored_orders(orders))
}

pub fn stats<S: KeyValueStore>(ledger: &OrderLedger<S>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_summary(ledger.summary()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin::builtin_entries;
    use crate::checkout::payment::{mint_order, PaymentRequest};
    use crate::error::StorefrontError;
    use crate::model::{CustomerInfo, PaymentInfo};
    use crate::orders::OrderSink;
    use crate::store::memory::InMemoryStore;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn ledger_with_order(now: DateTime<Utc>) -> (OrderLedger<InMemoryStore>, String, String) {
        let entry = builtin_entries().remove(0);
        let request = PaymentRequest {
            catalog_entry_id: entry.id.clone(),
            customer: CustomerInfo {
                email: "kim@example.com".into(),
                first_name: "Kim".into(),
                last_name: "Lee".into(),
                country: "KR".into(),
                phone: None,
            },
            payment: PaymentInfo::default(),
            amount: Decimal::new(5390, 2),
        };
        let order = mint_order(&request, now);
        let mut ledger = OrderLedger::new(InMemoryStore::new());
        ledger.record(&order, &entry).unwrap();
        (ledger, order.order_id, order.download_token)
    }

    #[test]
    fn show_and_download() {
        let now = Utc::now();
        let (ledger, id, token) = ledger_with_order(now);
        assert_eq!(show(&ledger, &id).unwrap().stored_orders.len(), 1);
        let result = download(&ledger, &token, now).unwrap();
        assert_eq!(result.download.unwrap().order_id, id);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn expired_download() {
        let now = Utc::now();
        let (ledger, _, token) = ledger_with_order(now);
        assert!(matches!(
            download(&ledger, &token, now + Duration::days(8)),
            Err(StorefrontError::DownloadExpired(_))
        ));
    }

    #[test]
    fn customer_lookup_and_stats() {
        let (ledger, _, _) = ledger_with_order(Utc::now());
        assert_eq!(
            for_customer(&ledger, "KIM@example.com")
                .unwrap()
                .stored_orders
                .len(),
            1
        );
        let none = for_customer(&ledger, "who@example.com").unwrap();
        assert_eq!(none.messages.len(), 1);

        let summary = stats(&ledger).unwrap().summary.unwrap();
        assert_eq!(summary.order_count, 1);
        assert_eq!(summary.revenue, Decimal::new(5390, 2));
    }
}
