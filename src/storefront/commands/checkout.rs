//! Runs a whole purchase in one go: customer step, payment step, then
//! recording the confirmed order.

use crate::catalog::CatalogRepository;
use crate::checkout::payment::PaymentProcessor;
use crate::checkout::Checkout;
use crate::commands::{report_validation, CmdMessage, CmdResult};
use crate::error::{Result, StorefrontError};
use crate::model::{CustomerInfo, PaymentInfo};
use crate::orders::OrderSink;
use crate::store::KeyValueStore;
use rust_decimal::Decimal;
use tracing::warn;

pub struct PurchaseRequest {
    pub entry_id: String,
    pub customer: CustomerInfo,
    pub payment: PaymentInfo,
}

pub async fn run<S: KeyValueStore>(
    repo: &CatalogRepository<S>,
    sink: &mut dyn OrderSink,
    processor: &dyn PaymentProcessor,
    tax_rate: Decimal,
    request: PurchaseRequest,
) -> Result<CmdResult> {
    let entry = repo
        .get(&request.entry_id)
        .ok_or_else(|| StorefrontError::NotFound(request.entry_id.clone()))?;

    let mut checkout = Checkout::new(entry, tax_rate);
    checkout.set_customer(request.customer)?;
    if let Err(e) = checkout.next() {
        return report_validation::<()>(Err(e), |_| CmdResult::default());
    }
    checkout.set_payment(request.payment)?;

    let order = match checkout.submit_payment(processor).await {
        Ok(order) => order,
        Err(e) => return report_validation::<()>(Err(e), |_| CmdResult::default()),
    };

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Order {} confirmed: {} for {}",
        order.order_id,
        checkout.entry().title,
        order.amount_charged
    )));

    // The receipt stands on its own; a failed write only costs the ledger copy.
    if let Err(e) = sink.record(&order, checkout.entry()) {
        warn!(order = %order.order_id, error = %e, "could not record order");
        result.add_message(CmdMessage::warning(format!(
            "Order {} was not saved to the order history: {}",
            order.order_id, e
        )));
    }

    Ok(result.with_order(order))
}
