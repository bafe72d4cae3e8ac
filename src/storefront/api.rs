//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for all storefront operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns the session state**: the catalog, the order ledger, the admin
//!   [`PinGate`] and the payment processor
//! - **Gates admin operations**: every admin method checks the gate first and
//!   fails with [`StorefrontError::AdminLocked`] while it is closed
//! - **Returns structured types** (`Result<CmdResult>`), never strings
//!
//! Business logic lives in `commands/*.rs` and below; printing lives in the CLI.
//!
//! ## Generic Over KeyValueStore
//!
//! `StorefrontApi<S: KeyValueStore>` runs on `FileStore` in production and
//! `InMemoryStore` in tests, so the whole surface is testable without a disk.
//!
//! [`StorefrontError::AdminLocked`]: crate::error::StorefrontError::AdminLocked

use crate::admin::PinGate;
use crate::catalog::CatalogRepository;
use crate::checkout::payment::{PaymentProcessor, SimulatedProcessor};
use crate::commands::{self, CmdMessage, CmdResult, StorefrontPaths};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::filter::{CatalogFilter, SortKey};
use crate::model::{CatalogEntry, EntryPatch};
use crate::orders::OrderLedger;
use crate::store::KeyValueStore;
use chrono::Utc;

pub struct StorefrontApi<S: KeyValueStore> {
    catalog: CatalogRepository<S>,
    ledger: OrderLedger<S>,
    gate: PinGate,
    processor: Box<dyn PaymentProcessor>,
    config: StorefrontConfig,
    paths: StorefrontPaths,
}

impl<S: KeyValueStore> StorefrontApi<S> {
    pub fn new(
        catalog_store: S,
        order_store: S,
        config: StorefrontConfig,
        paths: StorefrontPaths,
    ) -> Self {
        Self {
            catalog: CatalogRepository::new(catalog_store),
            ledger: OrderLedger::new(order_store).with_download_ttl(config.download_ttl()),
            gate: PinGate::new(config.admin_pin.clone()),
            processor: Box::new(SimulatedProcessor::new(config.processing_delay())),
            config,
            paths,
        }
    }

    /// Swap the payment processor, e.g. for one that declines.
    pub fn with_processor(mut self, processor: Box<dyn PaymentProcessor>) -> Self {
        self.processor = processor;
        self
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogRepository<S> {
        &self.catalog
    }

    pub fn ledger(&self) -> &OrderLedger<S> {
        &self.ledger
    }

    // --- storefront ---

    pub fn list_entries(&self, filter: &CatalogFilter, sort: SortKey) -> Result<CmdResult> {
        commands::list::run(&self.catalog, filter, sort)
    }

    pub fn search_entries(&self, term: &str) -> Result<CmdResult> {
        commands::list::run(&self.catalog, &CatalogFilter::new().search(term), SortKey::Featured)
    }

    pub fn view_entry(&self, id: &str) -> Result<CmdResult> {
        commands::view::run(&self.catalog, id)
    }

    pub fn categories(&self) -> Result<CmdResult> {
        commands::list::categories(&self.catalog)
    }

    pub async fn purchase(&mut self, request: commands::checkout::PurchaseRequest) -> Result<CmdResult> {
        commands::checkout::run(
            &self.catalog,
            &mut self.ledger,
            self.processor.as_ref(),
            self.config.tax_rate,
            request,
        )
        .await
    }

    // --- orders ---

    pub fn get_order(&self, order_id: &str) -> Result<CmdResult> {
        commands::orders::show(&self.ledger, order_id)
    }

    pub fn get_download(&self, token: &str) -> Result<CmdResult> {
        commands::orders::download(&self.ledger, token, Utc::now())
    }

    pub fn orders_for_customer(&self, email: &str) -> Result<CmdResult> {
        commands::orders::for_customer(&self.ledger, email)
    }

    pub fn sales_stats(&self) -> Result<CmdResult> {
        commands::orders::stats(&self.ledger)
    }

    // --- admin ---

    pub fn unlock_admin(&mut self, pin: &str) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        if self.gate.unlock(pin) {
            result.add_message(CmdMessage::info("Admin console unlocked"));
        } else {
            result.add_message(CmdMessage::error("Incorrect PIN"));
        }
        Ok(result)
    }

    pub fn lock_admin(&mut self) {
        self.gate.lock();
    }

    pub fn is_admin(&self) -> bool {
        self.gate.is_authenticated()
    }

    pub fn dashboard(&self) -> Result<CmdResult> {
        self.gate.ensure_unlocked()?;
        commands::dashboard::run(&self.catalog)
    }

    pub fn manage_entries(&self) -> Result<CmdResult> {
        self.gate.ensure_unlocked()?;
        commands::manage::run(&self.catalog)
    }

    pub fn add_entry(&mut self, entry: CatalogEntry) -> Result<CmdResult> {
        self.gate.ensure_unlocked()?;
        commands::add::run(&mut self.catalog, entry)
    }

    pub fn update_entry(&mut self, id: &str, patch: &EntryPatch) -> Result<CmdResult> {
        self.gate.ensure_unlocked()?;
        commands::update::run(&mut self.catalog, id, patch)
    }

    pub fn delete_entries(&mut self, ids: &[String]) -> Result<CmdResult> {
        self.gate.ensure_unlocked()?;
        commands::delete::run(&mut self.catalog, ids)
    }

    pub fn clear_user_entries(&mut self) -> Result<CmdResult> {
        self.gate.ensure_unlocked()?;
        commands::clear::run(&mut self.catalog)
    }

    // --- setup ---

    pub fn init(&self) -> Result<CmdResult> {
        commands::init::run(&self.paths)
    }

    pub fn config_action(&self, action: commands::config::ConfigAction) -> Result<CmdResult> {
        commands::config::run(&self.paths, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::payment::DeclinedProcessor;
    use crate::commands::checkout::PurchaseRequest;
    use crate::error::StorefrontError;
    use crate::model::{CustomerInfo, PaymentInfo};
    use crate::store::memory::fixtures::user_entry;
    use crate::store::memory::InMemoryStore;
    use std::path::PathBuf;

    fn make_api() -> StorefrontApi<InMemoryStore> {
        let config = StorefrontConfig {
            processing_delay_ms: 0,
            ..StorefrontConfig::default()
        };
        StorefrontApi::new(
            InMemoryStore::new(),
            InMemoryStore::new(),
            config,
            StorefrontPaths::new(PathBuf::from("/tmp/storefront-unused")),
        )
    }

    fn purchase(entry_id: &str) -> PurchaseRequest {
        PurchaseRequest {
            entry_id: entry_id.into(),
            customer: CustomerInfo {
                email: "sam@example.com".into(),
                first_name: "Sam".into(),
                last_name: "Park".into(),
                country: "CA".into(),
                phone: None,
            },
            payment: PaymentInfo {
                card_number: "4000 0000 0000 0002".into(),
                expiry: "03/31".into(),
                cvv: "999".into(),
                cardholder_name: "Sam Park".into(),
            },
        }
    }

    #[test]
    fn test_admin_ops_need_unlock() {
        let mut api = make_api();
        assert!(matches!(api.dashboard(), Err(StorefrontError::AdminLocked)));
        assert!(matches!(
            api.add_entry(user_entry("Mine", "Blog")),
            Err(StorefrontError::AdminLocked)
        ));
        assert!(matches!(
            api.clear_user_entries(),
            Err(StorefrontError::AdminLocked)
        ));
    }

    #[test]
    fn test_wrong_pin_reports_error() {
        let mut api = make_api();
        let result = api.unlock_admin("1111").unwrap();
        assert!(result.has_errors());
        assert!(!api.is_admin());
    }

    #[test]
    fn test_add_then_filter_by_category() {
        let mut api = make_api();
        api.unlock_admin("2024").unwrap();
        api.add_entry(user_entry("Mine", "Blog")).unwrap();

        let result = api
            .list_entries(&CatalogFilter::new().category("Blog"), SortKey::Featured)
            .unwrap();
        assert_eq!(result.listed_entries.len(), 2);

        api.lock_admin();
        assert!(api.manage_entries().is_err());
        assert_eq!(api.view_entry("mine").unwrap().listed_entries.len(), 1);
    }

    #[test]
    fn test_search_dispatch() {
        let api = make_api();
        let result = api.search_entries("BISTRO").unwrap();
        assert_eq!(result.listed_entries[0].id, "bistro-table");
    }

    #[tokio::test]
    async fn test_purchase_then_lookup() {
        let mut api = make_api();
        let result = api.purchase(purchase("launchpad-landing")).await.unwrap();
        let order = result.order.unwrap();

        let shown = api.get_order(&order.order_id).unwrap();
        assert_eq!(shown.stored_orders[0].entry_title, "Launchpad Landing");
        assert!(api.get_download(&order.download_token).unwrap().download.is_some());
        assert_eq!(
            api.orders_for_customer("sam@example.com")
                .unwrap()
                .stored_orders
                .len(),
            1
        );
        assert_eq!(api.sales_stats().unwrap().summary.unwrap().order_count, 1);
    }

    #[tokio::test]
    async fn test_declining_processor() {
        let mut api = make_api().with_processor(Box::new(DeclinedProcessor::new("stolen card")));
        assert!(matches!(
            api.purchase(purchase("cloud-saas")).await,
            Err(StorefrontError::Payment(_))
        ));
        assert_eq!(api.sales_stats().unwrap().summary.unwrap().order_count, 0);
    }
}
