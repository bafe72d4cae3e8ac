use crate::admin::DEFAULT_ADMIN_PIN;
use crate::checkout::payment::DEFAULT_PROCESSING_DELAY;
use crate::checkout::DEFAULT_TAX_RATE;
use crate::error::{Result, StorefrontError};
use crate::orders::DEFAULT_DOWNLOAD_TTL_DAYS;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

const CONFIG_FILENAME: &str = "config.json";
pub const ADMIN_PIN_ENV: &str = "STOREFRONT_ADMIN_PIN";
pub const MAX_DOWNLOAD_TTL_DAYS: i64 = 3650;

/// Configuration for the storefront, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// PIN for the admin console. A UI gate only, see `admin`.
    #[serde(default = "default_admin_pin")]
    pub admin_pin: String,

    /// Sales tax as a fraction (0.10 = 10%)
    #[serde(default = "default_tax_rate", with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,

    /// Simulated payment latency in milliseconds
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,

    /// Display currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// How long download links stay valid after purchase
    #[serde(default = "default_download_ttl_days")]
    pub download_ttl_days: i64,
}

fn default_admin_pin() -> String {
    DEFAULT_ADMIN_PIN.to_string()
}

fn default_tax_rate() -> Decimal {
    DEFAULT_TAX_RATE
}

fn default_processing_delay_ms() -> u64 {
    DEFAULT_PROCESSING_DELAY.as_millis() as u64
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_download_ttl_days() -> i64 {
    DEFAULT_DOWNLOAD_TTL_DAYS
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            admin_pin: default_admin_pin(),
            tax_rate: default_tax_rate(),
            processing_delay_ms: default_processing_delay_ms(),
            currency: default_currency(),
            download_ttl_days: default_download_ttl_days(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(StorefrontError::Io)?;
        let config: StorefrontConfig =
            serde_json::from_str(&content).map_err(StorefrontError::Serialization)?;
        Ok(config.sanitized())
    }

    /// Re-applies the `set()` rules to every value, resetting the ones that
    /// fail to their defaults.
    fn sanitized(self) -> Self {
        let mut clean = Self::default();
        for key in Self::keys() {
            let Ok(value) = self.get(key) else { continue };
            if let Err(e) = clean.set(key, &value) {
                warn!(key, value = %value, error = %e, "ignoring config value, using default");
            }
        }
        clean
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(StorefrontError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(StorefrontError::Serialization)?;
        fs::write(config_path, content).map_err(StorefrontError::Io)?;
        Ok(())
    }

    /// Apply environment overrides on top of the file values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(pin) = std::env::var(ADMIN_PIN_ENV) {
            if !pin.trim().is_empty() {
                self.admin_pin = pin.trim().to_string();
            }
        }
        self
    }

    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn download_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_days(self.download_ttl_days)
            .unwrap_or_else(|| chrono::Duration::days(DEFAULT_DOWNLOAD_TTL_DAYS))
    }

    pub fn keys() -> &'static [&'static str] {
        &[
            "admin-pin",
            "tax-rate",
            "processing-delay-ms",
            "currency",
            "download-ttl-days",
        ]
    }

    /// Read a setting by its CLI key (e.g. `tax-rate`)
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "admin-pin" => Ok(self.admin_pin.clone()),
            "tax-rate" => Ok(self.tax_rate.to_string()),
            "processing-delay-ms" => Ok(self.processing_delay_ms.to_string()),
            "currency" => Ok(self.currency.clone()),
            "download-ttl-days" => Ok(self.download_ttl_days.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update a setting by its CLI key, validating the value
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "admin-pin" => {
                if value.is_empty() {
                    return Err(StorefrontError::Api("admin-pin cannot be empty".into()));
                }
                self.admin_pin = value.to_string();
            }
            "tax-rate" => {
                let rate = Decimal::from_str(value)
                    .map_err(|_| StorefrontError::Api(format!("Invalid tax rate: {}", value)))?;
                if rate < Decimal::ZERO || rate > Decimal::ONE {
                    return Err(StorefrontError::Api(
                        "tax-rate must be between 0 and 1".into(),
                    ));
                }
                self.tax_rate = rate;
            }
            "processing-delay-ms" => {
                self.processing_delay_ms = value
                    .parse()
                    .map_err(|_| StorefrontError::Api(format!("Invalid delay: {}", value)))?;
            }
            "currency" => {
                if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
                    return Err(StorefrontError::Api(format!(
                        "Invalid currency code: {}",
                        value
                    )));
                }
                self.currency = value.to_uppercase();
            }
            "download-ttl-days" => {
                let days: i64 = value
                    .parse()
                    .map_err(|_| StorefrontError::Api(format!("Invalid day count: {}", value)))?;
                if !(1..=MAX_DOWNLOAD_TTL_DAYS).contains(&days) {
                    return Err(StorefrontError::Api(format!(
                        "download-ttl-days must be between 1 and {}",
                        MAX_DOWNLOAD_TTL_DAYS
                    )));
                }
                self.download_ttl_days = days;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> StorefrontError {
    StorefrontError::Api(format!(
        "Unknown config key: {} (expected one of: {})",
        key,
        StorefrontConfig::keys().join(", ")
    ))
}
