use super::{stored_size, KeyValueStore};
use crate::error::{Result, StorefrontError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_FILE_NAME: &str = "storage.json";

/// File-backed key-value store: one JSON object holding every key.
pub struct FileStore {
    root: PathBuf,
    file_name: String,
    quota: Option<usize>,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_name: DEFAULT_FILE_NAME.to_string(),
            quota: None,
        }
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        if name.ends_with(".json") {
            self.file_name = name.to_string();
        } else {
            self.file_name = format!("{}.json", name);
        }
        self
    }

    /// Reject writes that would grow the store beyond `bytes`.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(StorefrontError::Io)?;
        }
        Ok(())
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        let data_file = self.path();
        if !data_file.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&data_file).map_err(StorefrontError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let items: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(StorefrontError::Serialization)?;
        Ok(items)
    }

    fn save(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(quota) = self.quota {
            let needed = stored_size(items);
            if needed > quota {
                return Err(StorefrontError::QuotaExceeded { needed, quota });
            }
        }
        self.ensure_dir(&self.root)?;

        // Write to a sibling temp file first so a crash never leaves half a store behind.
        let content = serde_json::to_string_pretty(items).map_err(StorefrontError::Serialization)?;
        let tmp = self.root.join(format!("{}.tmp", self.file_name));
        fs::write(&tmp, content).map_err(StorefrontError::Io)?;
        fs::rename(&tmp, self.path()).map_err(StorefrontError::Io)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut items = self.load()?;
        if items.remove(key).is_some() {
            self.save(&items)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load()?.into_keys().collect())
    }
}
