use crate::checkout::payment::PaymentError;
use crate::checkout::CheckoutStep;
use crate::validation::ValidationReport;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Built-in template cannot be modified: {0}")]
    BuiltInEntry(String),

    #[error("A template with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Admin console is locked")]
    AdminLocked,

    #[error("Checkout cannot {action} from step {from}")]
    InvalidTransition {
        from: CheckoutStep,
        action: &'static str,
    },

    #[error("Payment failed: {0}")]
    Payment(#[from] PaymentError),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Download link not found: {0}")]
    DownloadNotFound(String),

    #[error("Download link expired: {0}")]
    DownloadExpired(String),

    #[error("Storage quota exceeded ({needed} bytes needed, {quota} allowed)")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl StorefrontError {
    /// True for failures raised by the storage layer rather than by the caller's input.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            StorefrontError::Io(_)
                | StorefrontError::Serialization(_)
                | StorefrontError::Store(_)
                | StorefrontError::QuotaExceeded { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
