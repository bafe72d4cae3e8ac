use crate::admin::{Dashboard, ManagedEntry};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::model::{CatalogEntry, OrderRecord};
use crate::orders::{DownloadGrant, SalesSummary, StoredOrder};
use crate::validation::ValidationReport;
use std::path::PathBuf;

pub mod add;
pub mod checkout;
pub mod clear;
pub mod config;
pub mod dashboard;
pub mod delete;
pub mod init;
pub mod list;
pub mod manage;
pub mod orders;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub struct StorefrontPaths {
    pub data_dir: PathBuf,
}

impl StorefrontPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn config_dir(&self) -> PathBuf {
        self.data_dir.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_entries: Vec<CatalogEntry>,
    pub listed_entries: Vec<CatalogEntry>,
    pub managed_entries: Vec<ManagedEntry>,
    pub dashboard: Option<Dashboard>,
    pub order: Option<OrderRecord>,
    pub stored_orders: Vec<StoredOrder>,
    pub download: Option<DownloadGrant>,
    pub summary: Option<SalesSummary>,
    pub config: Option<StorefrontConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_entries(mut self, entries: Vec<CatalogEntry>) -> Self {
        self.affected_entries = entries;
        self
    }

    pub fn with_listed_entries(mut self, entries: Vec<CatalogEntry>) -> Self {
        self.listed_entries = entries;
        self
    }

    pub fn with_managed_entries(mut self, entries: Vec<ManagedEntry>) -> Self {
        self.managed_entries = entries;
        self
    }

    pub fn with_dashboard(mut self, dashboard: Dashboard) -> Self {
        self.dashboard = Some(dashboard);
        self
    }

    pub fn with_order(mut self, order: OrderRecord) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_stored_orders(mut self, orders: Vec<StoredOrder>) -> Self {
        self.stored_orders = orders;
        self
    }

    pub fn with_download(mut self, grant: DownloadGrant) -> Self {
        self.download = Some(grant);
        self
    }

    pub fn with_summary(mut self, summary: SalesSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_config(mut self, config: StorefrontConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }
}

/// Field-level validation failures become inline error messages; anything
/// else is passed up to the caller.
pub(crate) fn report_validation<T>(
    outcome: Result<T>,
    on_ok: impl FnOnce(T) -> CmdResult,
) -> Result<CmdResult> {
    match outcome {
        Ok(value) => Ok(on_ok(value)),
        Err(StorefrontError::Validation(report)) => Ok(validation_result(&report)),
        Err(e) => Err(e),
    }
}

pub(crate) fn validation_result(report: &ValidationReport) -> CmdResult {
    let mut result = CmdResult::default();
    for error in report.errors() {
        result.add_message(CmdMessage::error(error.to_string()));
    }
    result
}
