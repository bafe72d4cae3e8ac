use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Beginner,
            Difficulty::Intermediate,
            Difficulty::Advanced,
        ]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!("Invalid difficulty: {}", s)),
        }
    }
}

/// Merchandising badges shown on a template card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFlags {
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_popular: bool,
}

/// One purchasable template.
///
/// The serialized form is the one persisted under the user-template key, so
/// field names follow the camelCase layout of that JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    pub thumbnail_url: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_purchase_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(flatten)]
    pub flags: EntryFlags,
    pub difficulty: Difficulty,
}

impl CatalogEntry {
    /// A bare entry with the required display fields set and everything else empty.
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id: String::new(),
            title: title.into(),
            category: category.into(),
            description: description.into(),
            price,
            original_price: None,
            rating: 0.0,
            review_count: 0,
            thumbnail_url: String::new(),
            tags: BTreeSet::new(),
            features: Vec::new(),
            external_purchase_url: None,
            download_url: None,
            demo_url: None,
            flags: EntryFlags::default(),
            difficulty: Difficulty::Beginner,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = url.into();
        self
    }

    pub fn with_demo(mut self, url: impl Into<String>) -> Self {
        self.demo_url = Some(url.into());
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_features<I, T>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.features = features.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Savings against `original_price`, if the entry is discounted.
    pub fn discount(&self) -> Option<Decimal> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }
}

/// Partial update for a user-added entry. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub original_price: Option<Option<Decimal>>,
    pub rating: Option<f32>,
    pub review_count: Option<u32>,
    pub thumbnail_url: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub features: Option<Vec<String>>,
    pub external_purchase_url: Option<Option<String>>,
    pub download_url: Option<Option<String>>,
    pub demo_url: Option<Option<String>>,
    pub is_featured: Option<bool>,
    pub is_best_seller: Option<bool>,
    pub is_new: Option<bool>,
    pub is_popular: Option<bool>,
    pub difficulty: Option<Difficulty>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.original_price.is_none()
            && self.rating.is_none()
            && self.review_count.is_none()
            && self.thumbnail_url.is_none()
            && self.tags.is_none()
            && self.features.is_none()
            && self.external_purchase_url.is_none()
            && self.download_url.is_none()
            && self.demo_url.is_none()
            && self.is_featured.is_none()
            && self.is_best_seller.is_none()
            && self.is_new.is_none()
            && self.is_popular.is_none()
            && self.difficulty.is_none()
    }

    /// Applies the patch. The entry id is never touched.
    pub fn apply_to(&self, entry: &mut CatalogEntry) {
        if let Some(title) = &self.title {
            entry.title = title.clone();
        }
        if let Some(category) = &self.category {
            entry.category = category.clone();
        }
        if let Some(description) = &self.description {
            entry.description = description.clone();
        }
        if let Some(price) = self.price {
            entry.price = price;
        }
        if let Some(original_price) = self.original_price {
            entry.original_price = original_price;
        }
        if let Some(rating) = self.rating {
            entry.rating = rating;
        }
        if let Some(review_count) = self.review_count {
            entry.review_count = review_count;
        }
        if let Some(thumbnail_url) = &self.thumbnail_url {
            entry.thumbnail_url = thumbnail_url.clone();
        }
        if let Some(tags) = &self.tags {
            entry.tags = tags.clone();
        }
        if let Some(features) = &self.features {
            entry.features = features.clone();
        }
        if let Some(url) = &self.external_purchase_url {
            entry.external_purchase_url = url.clone();
        }
        if let Some(url) = &self.download_url {
            entry.download_url = url.clone();
        }
        if let Some(url) = &self.demo_url {
            entry.demo_url = url.clone();
        }
        if let Some(featured) = self.is_featured {
            entry.flags.is_featured = featured;
        }
        if let Some(best_seller) = self.is_best_seller {
            entry.flags.is_best_seller = best_seller;
        }
        if let Some(is_new) = self.is_new {
            entry.flags.is_new = is_new;
        }
        if let Some(popular) = self.is_popular {
            entry.flags.is_popular = popular;
        }
        if let Some(difficulty) = self.difficulty {
            entry.difficulty = difficulty;
        }
    }
}

/// Contact details collected by the first checkout step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl CustomerInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Card details collected by the second checkout step. Never persisted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentInfo {
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub cardholder_name: String,
}

impl PaymentInfo {
    /// Last four digits of the card, for receipts.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

impl fmt::Debug for PaymentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentInfo")
            .field("card_number", &format!("****{}", self.last_four()))
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .field("cardholder_name", &self.cardholder_name)
            .finish()
    }
}

/// Receipt produced by a successful checkout. Immutable once minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub order_id: String,
    pub catalog_entry_id: String,
    pub customer: CustomerInfo,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_charged: Decimal,
    pub download_token: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CatalogEntry {
        CatalogEntry::new("Folio", "Portfolio", "A portfolio", Decimal::new(2999, 2))
            .with_id("folio")
            .with_thumbnail("https://img.example.com/folio.png")
            .with_tags(["portfolio", "minimal"])
            .with_features(["Responsive"])
    }

    #[test]
    fn entry_serializes_camel_case_with_flattened_flags() {
        let mut entry = sample();
        entry.flags.is_best_seller = true;
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["thumbnailUrl"], "https://img.example.com/folio.png");
        assert_eq!(json["isBestSeller"], true);
        assert_eq!(json["price"], 29.99);
        assert!(json.get("originalPrice").is_none());
    }

    #[test]
    fn entry_deserializes_with_missing_optionals() {
        let json = r#"{
            "id": "x",
            "title": "X",
            "category": "Blog",
            "description": "d",
            "price": 49,
            "thumbnailUrl": "https://a.b/c.png",
            "difficulty": "Advanced"
        }"#;
        let entry: CatalogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.price, Decimal::new(49, 0));
        assert!(entry.tags.is_empty());
        assert!(!entry.flags.is_new);
        assert_eq!(entry.difficulty, Difficulty::Advanced);
    }

    #[test]
    fn patch_leaves_id_alone() {
        let mut entry = sample();
        let patch = EntryPatch {
            title: Some("Folio Pro".into()),
            price: Some(Decimal::new(39, 0)),
            ..Default::default()
        };
        patch.apply_to(&mut entry);
        assert_eq!(entry.id, "folio");
        assert_eq!(entry.title, "Folio Pro");
        assert_eq!(entry.price, Decimal::new(39, 0));
        assert_eq!(entry.category, "Portfolio");
    }

    #[test]
    fn patch_sets_popular_flag_only() {
        let mut entry = sample();
        entry.flags.is_featured = true;
        let patch = EntryPatch {
            is_popular: Some(true),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut entry);
        assert!(entry.flags.is_popular);
        assert!(entry.flags.is_featured);
        assert!(!entry.flags.is_best_seller);
    }

    #[test]
    fn discount_only_when_original_is_higher() {
        let mut entry = sample();
        assert_eq!(entry.discount(), None);
        entry.original_price = Some(Decimal::new(4999, 2));
        assert_eq!(entry.discount(), Some(Decimal::new(2000, 2)));
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("beginner".parse(), Ok(Difficulty::Beginner));
        assert_eq!(" ADVANCED ".parse(), Ok(Difficulty::Advanced));
        assert!("expert".parse::<Difficulty>().is_err());
    }

    #[test]
    fn payment_debug_masks_card() {
        let payment = PaymentInfo {
            card_number: "4242 4242 4242 1234".into(),
            expiry: "12/30".into(),
            cvv: "123".into(),
            cardholder_name: "Ada".into(),
        };
        let debug = format!("{:?}", payment);
        assert!(debug.contains("****1234"));
        assert!(!debug.contains("123\""));
        assert!(!debug.contains("4242"));
    }
}
