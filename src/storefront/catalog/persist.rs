//! Adapter between the catalog and a [`KeyValueStore`]: the user-added
//! entries live as one JSON array under [`USER_ENTRIES_KEY`].

use crate::error::{Result, StorefrontError};
use crate::model::CatalogEntry;
use crate::store::KeyValueStore;

pub const USER_ENTRIES_KEY: &str = "custom_templates";

pub struct UserEntryStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> UserEntryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the whole array. A missing key is an empty catalog; malformed
    /// JSON is an error.
    pub fn load(&self) -> Result<Vec<CatalogEntry>> {
        match self.store.get_item(USER_ENTRIES_KEY)? {
            Some(json) if !json.trim().is_empty() => {
                serde_json::from_str(&json).map_err(StorefrontError::Serialization)
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Replaces the whole array.
    pub fn save(&mut self, entries: &[CatalogEntry]) -> Result<()> {
        let json = serde_json::to_string(entries).map_err(StorefrontError::Serialization)?;
        self.store.set_item(USER_ENTRIES_KEY, &json)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove_item(USER_ENTRIES_KEY)
    }

    pub fn inner(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::{user_entry, StoreFixture};
    use crate::store::memory::InMemoryStore;

    #[test]
    fn empty_store_loads_nothing() {
        let adapter = UserEntryStore::new(InMemoryStore::new());
        assert!(adapter.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load() {
        let mut adapter = UserEntryStore::new(InMemoryStore::new());
        let entry = user_entry("Harbor", "Business").with_id("harbor");
        adapter.save(std::slice::from_ref(&entry)).unwrap();
        assert_eq!(adapter.load().unwrap(), vec![entry]);
    }

    #[test]
    fn corrupt_json_is_reported() {
        let fixture = StoreFixture::new().with_corrupt_user_entries();
        let adapter = UserEntryStore::new(fixture.store);
        assert!(matches!(
            adapter.load(),
            Err(StorefrontError::Serialization(_))
        ));
    }

    #[test]
    fn clear_removes_key() {
        let fixture = StoreFixture::new().with_user_entries(&[user_entry("A", "Blog")]);
        let mut adapter = UserEntryStore::new(fixture.store);
        adapter.clear().unwrap();
        assert!(adapter.inner().get_item(USER_ENTRIES_KEY).unwrap().is_none());
    }
}
