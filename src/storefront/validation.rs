//! # Validation
//!
//! The one place input rules live. The repository, the admin console and the
//! checkout wizard all call into this module, so a rule changed here changes
//! everywhere at once.
//!
//! Validators never fail: they return a [`ValidationReport`] listing every
//! problem found, keyed by field name, and the caller decides what to do.

use crate::model::{CatalogEntry, CustomerInfo, PaymentInfo};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;
use url::Url;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

pub const MAX_RATING: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of a validation pass. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Records `message` against `field` unless `ok` holds.
    pub fn check(mut self, ok: bool, field: &'static str, message: &str) -> Self {
        if !ok {
            self.add(field, message);
        }
        self
    }

    pub fn require(self, value: &str, field: &'static str) -> Self {
        self.check(!value.trim().is_empty(), field, "is required")
    }

    pub fn merge(mut self, other: ValidationReport) -> Self {
        self.errors.extend(other.errors);
        self
    }

    pub fn into_result(self) -> crate::error::Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(crate::error::StorefrontError::Validation(self))
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Accepts absolute URLs, including `data:` URIs for embedded thumbnails.
pub fn is_valid_uri(value: &str) -> bool {
    Url::parse(value.trim()).is_ok()
}

pub fn validate_email(email: &str) -> ValidationReport {
    let report = ValidationReport::new().require(email, "email");
    if report.is_valid() {
        report.check(is_valid_email(email), "email", "is not a valid email address")
    } else {
        report
    }
}

fn check_optional_uri(
    report: ValidationReport,
    value: Option<&str>,
    field: &'static str,
) -> ValidationReport {
    match value {
        Some(v) => report.check(is_valid_uri(v), field, "is not a valid URL"),
        None => report,
    }
}

/// Rules for a user-submitted catalog entry. Built-in entries are trusted and
/// never pass through here.
pub fn validate_entry(entry: &CatalogEntry) -> ValidationReport {
    let mut report = ValidationReport::new()
        .require(&entry.title, "title")
        .require(&entry.category, "category")
        .require(&entry.description, "description")
        .check(entry.price > Decimal::ZERO, "price", "must be greater than zero")
        .check(
            (0.0..=MAX_RATING).contains(&entry.rating),
            "rating",
            "must be between 0 and 5",
        )
        .check(
            entry.tags.iter().any(|t| !t.trim().is_empty()),
            "tags",
            "at least one tag is required",
        )
        .check(
            entry.features.iter().any(|f| !f.trim().is_empty()),
            "features",
            "at least one feature is required",
        );

    if let Some(original) = entry.original_price {
        report = report.check(
            original >= Decimal::ZERO,
            "originalPrice",
            "must not be negative",
        );
    }

    report = if entry.thumbnail_url.trim().is_empty() {
        report.check(false, "thumbnailUrl", "is required")
    } else {
        report.check(
            is_valid_uri(&entry.thumbnail_url),
            "thumbnailUrl",
            "is not a valid URL",
        )
    };

    report = match entry.demo_url.as_deref() {
        Some(url) if !url.trim().is_empty() => {
            report.check(is_valid_uri(url), "demoUrl", "is not a valid URL")
        }
        _ => report.check(false, "demoUrl", "is required"),
    };

    report = check_optional_uri(report, entry.download_url.as_deref(), "downloadUrl");
    check_optional_uri(
        report,
        entry.external_purchase_url.as_deref(),
        "externalPurchaseUrl",
    )
}

pub fn validate_customer(customer: &CustomerInfo) -> ValidationReport {
    validate_email(&customer.email)
        .require(&customer.first_name, "firstName")
        .require(&customer.last_name, "lastName")
        .require(&customer.country, "country")
}

/// Presence checks only: this is a simulated payment, there is no Luhn or
/// expiry-date verification.
pub fn validate_payment(payment: &PaymentInfo) -> ValidationReport {
    ValidationReport::new()
        .require(&payment.card_number, "cardNumber")
        .require(&payment.expiry, "expiry")
        .require(&payment.cvv, "cvv")
        .require(&payment.cardholder_name, "cardholderName")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_entry() -> CatalogEntry {
        CatalogEntry::new("Inkwell", "Blog", "A writing theme", Decimal::new(39, 0))
            .with_thumbnail("https://img.example.com/ink.png")
            .with_demo("https://demo.example.com/ink")
            .with_tags(["blog"])
            .with_features(["Dark mode"])
    }

    #[test]
    fn valid_entry_passes() {
        let report = validate_entry(&valid_entry());
        assert!(report.is_valid(), "{}", report);
    }

    #[test]
    fn reports_every_missing_field() {
        let entry = CatalogEntry::new("", "", "", Decimal::ZERO);
        let report = validate_entry(&entry);
        for field in [
            "title",
            "category",
            "description",
            "price",
            "thumbnailUrl",
            "tags",
            "features",
            "demoUrl",
        ] {
            assert!(report.has_error_for(field), "missing error for {}", field);
        }
    }

    #[test]
    fn whitespace_only_is_missing() {
        let mut entry = valid_entry();
        entry.title = "   ".into();
        assert!(validate_entry(&entry).has_error_for("title"));
    }

    #[test]
    fn data_uri_thumbnail_is_accepted() {
        let entry = valid_entry().with_thumbnail("data:image/png;base64,iVBORw0KGgo=");
        assert!(validate_entry(&entry).is_valid());
    }

    #[test]
    fn malformed_urls_are_rejected() {
        let mut entry = valid_entry().with_thumbnail("not a url");
        entry.download_url = Some("also not".into());
        let report = validate_entry(&entry);
        assert!(report.has_error_for("thumbnailUrl"));
        assert!(report.has_error_for("downloadUrl"));
    }

    #[test]
    fn rating_out_of_range() {
        let mut entry = valid_entry();
        entry.rating = 5.5;
        assert!(validate_entry(&entry).has_error_for("rating"));
    }

    #[test]
    fn email_rules() {
        assert!(is_valid_email("ada@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada example.com"));
        assert!(validate_email("").has_error_for("email"));
        assert_eq!(validate_email("").errors().len(), 1);
    }

    #[test]
    fn customer_requires_all_contact_fields() {
        let report = validate_customer(&CustomerInfo::default());
        assert!(report.has_error_for("email"));
        assert!(report.has_error_for("firstName"));
        assert!(report.has_error_for("lastName"));
        assert!(report.has_error_for("country"));
        assert!(!report.has_error_for("phone"));
    }

    #[test]
    fn payment_is_presence_only() {
        let payment = PaymentInfo {
            card_number: "1".into(),
            expiry: "00/00".into(),
            cvv: "x".into(),
            cardholder_name: "A".into(),
        };
        assert!(validate_payment(&payment).is_valid());
        assert_eq!(validate_payment(&PaymentInfo::default()).errors().len(), 4);
    }

    #[test]
    fn report_display_joins_messages() {
        let report = ValidationReport::new()
            .require("", "title")
            .require("", "category");
        assert_eq!(report.to_string(), "title: is required; category: is required");
    }
}
