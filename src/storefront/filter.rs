//! # Filter/Search Engine
//!
//! Pure functions that narrow a slice of catalog entries. Every criterion is
//! optional; the active ones are ANDed together, so the result never depends
//! on the order they are checked in. Output preserves input order and is
//! always a subset of the input, which makes filtering idempotent.
//!
//! A linear scan is plenty: catalogs hold tens of entries.

use crate::catalog::ALL_CATEGORIES;
use crate::model::{CatalogEntry, Difficulty};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Result<Self, String> {
        if min > max {
            return Err(format!("Invalid price range: {} > {}", min, max));
        }
        Ok(Self { min, max })
    }

    pub fn at_least(min: Decimal) -> Self {
        Self { min, max: Decimal::MAX }
    }

    pub fn at_most(max: Decimal) -> Self {
        Self {
            min: Decimal::ZERO,
            max,
        }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub price_range: Option<PriceRange>,
    pub tags: Vec<String>,
    pub difficulty: Option<Difficulty>,
}

fn is_category_sentinel(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case("all") || value.eq_ignore_ascii_case(ALL_CATEGORIES)
}

impl CatalogFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// "All" / "All Templates" clear the category criterion.
    pub fn category(mut self, category: &str) -> Self {
        self.category = (!is_category_sentinel(category)).then(|| category.to_string());
        self
    }

    /// Whitespace-only text clears the search criterion.
    pub fn search(mut self, text: &str) -> Self {
        let text = text.trim();
        self.search = (!text.is_empty()).then(|| text.to_string());
        self
    }

    pub fn price_range(mut self, range: PriceRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.trim().is_empty())
            .collect();
        self
    }

    pub fn difficulty(mut self, difficulty: Option<Difficulty>) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Parses a difficulty label; "All" clears the criterion.
    pub fn difficulty_label(self, label: &str) -> Result<Self, String> {
        if is_category_sentinel(label) {
            return Ok(self.difficulty(None));
        }
        Ok(self.difficulty(Some(Difficulty::from_str(label)?)))
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.search.is_none()
            && self.price_range.is_none()
            && self.tags.is_empty()
            && self.difficulty.is_none()
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.category
            .as_deref()
            .is_none_or(|c| entry.category == c)
            && self.search.as_deref().is_none_or(|q| matches_text(entry, q))
            && self.price_range.is_none_or(|r| r.contains(entry.price))
            && (self.tags.is_empty() || matches_any_tag(entry, &self.tags))
            && self.difficulty.is_none_or(|d| entry.difficulty == d)
    }
}

fn matches_text(entry: &CatalogEntry, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    entry.title.to_lowercase().contains(&query)
        || entry.description.to_lowercase().contains(&query)
        || entry.category.to_lowercase().contains(&query)
        || entry.tags.iter().any(|t| t.to_lowercase().contains(&query))
}

fn matches_any_tag(entry: &CatalogEntry, wanted: &[String]) -> bool {
    let wanted: Vec<String> = wanted.iter().map(|t| t.trim().to_lowercase()).collect();
    entry.tags.iter().any(|tag| {
        let tag = tag.to_lowercase();
        wanted.iter().any(|w| tag.contains(w.as_str()))
    })
}

pub fn filter(entries: &[CatalogEntry], criteria: &CatalogFilter) -> Vec<CatalogEntry> {
    entries
        .iter()
        .filter(|e| criteria.matches(e))
        .cloned()
        .collect()
}

pub fn search(entries: &[CatalogEntry], text: &str) -> Vec<CatalogEntry> {
    filter(entries, &CatalogFilter::new().search(text))
}

pub fn by_category(entries: &[CatalogEntry], category: &str) -> Vec<CatalogEntry> {
    filter(entries, &CatalogFilter::new().category(category))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order, featured entries first, then best sellers
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
    Rating,
    Newest,
    Title,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "featured" => Ok(SortKey::Featured),
            "price" | "price-asc" | "price-low-high" => Ok(SortKey::PriceLowHigh),
            "price-desc" | "price-high-low" => Ok(SortKey::PriceHighLow),
            "rating" => Ok(SortKey::Rating),
            "newest" | "new" => Ok(SortKey::Newest),
            "title" | "name" => Ok(SortKey::Title),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

/// Stable sort, so ties keep catalog order.
pub fn sort_entries(entries: &mut [CatalogEntry], key: SortKey) {
    match key {
        SortKey::Featured => entries.sort_by_key(|e| (!e.flags.is_featured, !e.flags.is_best_seller)),
        SortKey::PriceLowHigh => entries.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceHighLow => entries.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Rating => entries.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.review_count.cmp(&a.review_count))
        }),
        SortKey::Newest => entries.sort_by_key(|e| !e.flags.is_new),
        SortKey::Title => entries.sort_by_key(|e| e.title.to_lowercase()),
    }
}
