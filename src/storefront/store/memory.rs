use super::{stored_size, KeyValueStore};
use crate::error::{Result, StorefrontError};
use std::collections::HashMap;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    items: HashMap<String, String>,
    quota: Option<usize>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes that would grow the store beyond `bytes`, like a full
    /// browser storage area.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let others = stored_size(self.items.iter().filter(|(k, _)| k.as_str() != key));
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorefrontError::QuotaExceeded { needed, quota });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.keys().cloned().collect())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::catalog::persist::USER_ENTRIES_KEY;
    use crate::model::{CatalogEntry, Difficulty};
    use rust_decimal::Decimal;

    /// A user-added entry that passes validation.
    pub fn user_entry(title: &str, category: &str) -> CatalogEntry {
        CatalogEntry::new(
            title,
            category,
            format!("{} template", title),
            Decimal::new(29, 0),
        )
        .with_thumbnail("https://images.example.com/thumb.png")
        .with_demo("https://demo.example.com/preview")
        .with_tags(["custom", "starter"])
        .with_features(["Responsive layout"])
        .with_difficulty(Difficulty::Intermediate)
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Seed the user-template key directly, bypassing validation.
        pub fn with_user_entries(mut self, entries: &[CatalogEntry]) -> Self {
            let json = serde_json::to_string(entries).unwrap();
            self.store.set_item(USER_ENTRIES_KEY, &json).unwrap();
            self
        }

        pub fn with_corrupt_user_entries(mut self) -> Self {
            self.store
                .set_item(USER_ENTRIES_KEY, "[{\"id\": \"broken\"")
                .unwrap();
            self
        }

        pub fn with_quota(mut self, bytes: usize) -> Self {
            self.store = self.store.with_quota(bytes);
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_roundtrip() {
        let mut store = InMemoryStore::new();
        store.set_item("a", "1").unwrap();
        assert_eq!(store.get_item("a").unwrap(), Some("1".to_string()));
        store.remove_item("a").unwrap();
        store.remove_item("a").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn prefix_scan_is_sorted() {
        let mut store = InMemoryStore::new();
        store.set_item("order:b", "").unwrap();
        store.set_item("order:a", "").unwrap();
        store.set_item("download:x", "").unwrap();
        assert_eq!(
            store.keys_with_prefix("order:").unwrap(),
            vec!["order:a".to_string(), "order:b".to_string()]
        );
    }

    #[test]
    fn quota_counts_replacement_not_addition() {
        let mut store = InMemoryStore::new().with_quota(10);
        store.set_item("k", "123456789").unwrap();
        store.set_item("k", "987654321").unwrap();
        assert!(matches!(
            store.set_item("k", "1234567890"),
            Err(StorefrontError::QuotaExceeded {
                needed: 11,
                quota: 10
            })
        ));
    }
}
