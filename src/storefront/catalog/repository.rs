use super::builtin::builtin_entries;
use super::persist::UserEntryStore;
use super::slug::{sanitize_id, slugify};
use crate::error::{Result, StorefrontError};
use crate::model::{CatalogEntry, EntryPatch};
use crate::store::KeyValueStore;
use crate::validation::validate_entry;
use tracing::{debug, warn};

/// Built-in templates merged with the user-added ones held in a store.
///
/// Every read goes back to the store, so a mutation is visible to the very
/// next call without any cache to invalidate. Mutations only ever touch the
/// user-added array; built-ins are refused.
pub struct CatalogRepository<S: KeyValueStore> {
    builtins: Vec<CatalogEntry>,
    user: UserEntryStore<S>,
}

impl<S: KeyValueStore> CatalogRepository<S> {
    pub fn new(store: S) -> Self {
        Self::with_builtins(store, builtin_entries())
    }

    pub fn with_builtins(store: S, builtins: Vec<CatalogEntry>) -> Self {
        Self {
            builtins,
            user: UserEntryStore::new(store),
        }
    }

    pub fn builtins(&self) -> &[CatalogEntry] {
        &self.builtins
    }

    pub fn is_builtin(&self, id: &str) -> bool {
        self.builtins.iter().any(|e| e.id == id)
    }

    pub fn store(&self) -> &S {
        self.user.inner()
    }

    /// Persisted user entries. Errors on unreadable storage.
    pub fn user_entries(&self) -> Result<Vec<CatalogEntry>> {
        self.user.load()
    }

    /// Built-ins followed by user entries. Unreadable storage degrades to
    /// the built-ins alone.
    pub fn all(&self) -> Vec<CatalogEntry> {
        let mut entries = self.builtins.clone();
        match self.user.load() {
            Ok(user) => entries.extend(user),
            Err(e) => warn!(error = %e, "could not read user templates, showing built-ins only"),
        }
        entries
    }

    pub fn get(&self, id: &str) -> Option<CatalogEntry> {
        self.all().into_iter().find(|e| e.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for entry in self.all() {
            if !seen.contains(&entry.category) {
                seen.push(entry.category);
            }
        }
        seen
    }

    /// Validates and persists a new user entry. An empty id is derived from
    /// the title. Ids already used by a built-in or user entry are rejected.
    pub fn add(&mut self, mut entry: CatalogEntry) -> Result<CatalogEntry> {
        validate_entry(&entry).into_result()?;

        entry.id = if entry.id.trim().is_empty() {
            slugify(&entry.title)
        } else {
            sanitize_id(&entry.id)
        };
        if entry.id.is_empty() {
            let mut report = crate::validation::ValidationReport::new();
            report.add("id", "could not derive a URL-safe id from the title");
            return Err(StorefrontError::Validation(report));
        }
        if self.is_builtin(&entry.id) {
            return Err(StorefrontError::DuplicateId(entry.id));
        }

        let mut user = self.load_for_write("add")?;
        if user.iter().any(|e| e.id == entry.id) {
            return Err(StorefrontError::DuplicateId(entry.id));
        }
        user.push(entry.clone());
        self.save_for_write(&user, "add")?;

        debug!(id = %entry.id, "added user template");
        Ok(entry)
    }

    pub fn update(&mut self, id: &str, patch: &EntryPatch) -> Result<CatalogEntry> {
        if self.is_builtin(id) {
            return Err(StorefrontError::BuiltInEntry(id.to_string()));
        }

        let mut user = self.load_for_write("update")?;
        let slot = user
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StorefrontError::NotFound(id.to_string()))?;

        let mut updated = slot.clone();
        patch.apply_to(&mut updated);
        validate_entry(&updated).into_result()?;
        *slot = updated.clone();

        self.save_for_write(&user, "update")?;
        debug!(id, "updated user template");
        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<CatalogEntry> {
        let mut removed = self.delete_many(&[id])?;
        Ok(removed.remove(0))
    }

    /// Deletes every id or none of them: a built-in or unknown id fails the
    /// whole call before the store is written.
    pub fn delete_many<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<Vec<CatalogEntry>> {
        if let Some(id) = ids.iter().map(AsRef::as_ref).find(|id| self.is_builtin(id)) {
            return Err(StorefrontError::BuiltInEntry(id.to_string()));
        }

        let mut user = self.load_for_write("delete")?;
        if let Some(id) = ids
            .iter()
            .map(AsRef::as_ref)
            .find(|id| !user.iter().any(|e| e.id == *id))
        {
            return Err(StorefrontError::NotFound(id.to_string()));
        }

        let mut removed = Vec::new();
        for id in ids.iter().map(AsRef::as_ref) {
            if let Some(position) = user.iter().position(|e| e.id == id) {
                removed.push(user.remove(position));
            }
        }

        self.save_for_write(&user, "delete")?;
        debug!(count = removed.len(), "deleted user templates");
        Ok(removed)
    }

    /// Drops every user entry. Returns how many were removed; an unreadable
    /// store counts as zero but is still cleared.
    pub fn clear_user_entries(&mut self) -> Result<usize> {
        let count = match self.user.load() {
            Ok(user) => user.len(),
            Err(e) => {
                warn!(error = %e, "clearing unreadable user templates");
                0
            }
        };
        self.user.clear().inspect_err(|e| {
            warn!(error = %e, "could not clear user templates");
        })?;
        Ok(count)
    }

    fn load_for_write(&self, op: &str) -> Result<Vec<CatalogEntry>> {
        self.user.load().inspect_err(|e| {
            warn!(error = %e, op, "user templates unreadable, operation abandoned");
        })
    }

    fn save_for_write(&mut self, entries: &[CatalogEntry], op: &str) -> Result<()> {
        self.user.save(entries).inspect_err(|e| {
            warn!(error = %e, op, "could not persist user templates");
        })
    }
}
