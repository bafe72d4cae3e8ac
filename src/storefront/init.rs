use crate::api::StorefrontApi;
use crate::commands::StorefrontPaths;
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::store::fs::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{debug, warn};

pub const HOME_ENV: &str = "STOREFRONT_HOME";
pub const CATALOG_FILE: &str = "storage.json";
pub const ORDERS_FILE: &str = "orders.json";

pub struct StorefrontContext {
    pub api: StorefrontApi<FileStore>,
    pub config: StorefrontConfig,
}

/// `STOREFRONT_HOME` when set, the platform data directory otherwise.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let proj_dirs = ProjectDirs::from("com", "storefront", "storefront").ok_or_else(|| {
        StorefrontError::Store("could not determine a data directory".to_string())
    })?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

pub fn initialize() -> Result<StorefrontContext> {
    initialize_at(data_dir()?)
}

pub fn initialize_at(data_dir: PathBuf) -> Result<StorefrontContext> {
    let paths = StorefrontPaths::new(data_dir.clone());
    let config = StorefrontConfig::load(paths.config_dir())
        .unwrap_or_else(|e| {
            warn!(error = %e, "unreadable config.json, using defaults");
            StorefrontConfig::default()
        })
        .with_env_overrides();
    debug!(dir = %data_dir.display(), "storefront data directory");

    let catalog_store = FileStore::new(data_dir.clone()).with_file_name(CATALOG_FILE);
    let order_store = FileStore::new(data_dir).with_file_name(ORDERS_FILE);
    let api = StorefrontApi::new(catalog_store, order_store, config.clone(), paths);

    Ok(StorefrontContext { api, config })
}
