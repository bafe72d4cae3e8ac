//! # Catalog
//!
//! The template catalog is two lists glued together on every read:
//!
//! - **built-ins**, shipped with the binary ([`builtin`]), immutable
//! - **user-added** entries, created through the admin console and persisted
//!   as one JSON array in a [`KeyValueStore`](crate::store::KeyValueStore)
//!   ([`persist`])
//!
//! [`CatalogRepository`] owns both and is the only code allowed to mutate the
//! persisted array.

pub mod builtin;
pub mod persist;
pub mod repository;
pub mod slug;

pub use repository::CatalogRepository;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All Templates";
