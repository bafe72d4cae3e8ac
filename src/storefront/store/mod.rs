//! # Storage Layer
//!
//! The storefront persists everything through the [`KeyValueStore`] trait: a
//! string-keyed, string-valued store with the same shape as a browser's local
//! storage. Nothing above this layer knows whether values end up on disk or in
//! a test's memory.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage
//!   - One JSON object file per store (e.g. `storage.json`)
//!   - The whole file is rewritten on every mutation
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Optional byte quota, to exercise quota-exceeded failures
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── storage.json   # catalog store: {"custom_templates": "[...]"}
//! ├── orders.json    # order ledger: {"order:ORD-..": "{...}", "download:..": "{...}"}
//! └── config.json    # StorefrontConfig
//! ```
//!
//! Values are opaque strings; callers own their encoding (JSON throughout).
//! There are no transactions: a caller that needs to change a collection
//! reads the whole value, modifies it, and writes it back.

use crate::error::Result;

pub mod fs;
pub mod memory;

/// Abstract key-value storage, modelled on a browser's local storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;

    /// All keys currently present, in no particular order
    fn keys(&self) -> Result<Vec<String>>;

    /// Keys starting with `prefix`, sorted
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self
            .keys()?
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

/// Total bytes a set of key/value pairs occupies against a quota.
pub(crate) fn stored_size<'a, I>(items: I) -> usize
where
    I: IntoIterator<Item = (&'a String, &'a String)>,
{
    items.into_iter().map(|(k, v)| k.len() + v.len()).sum()
}
