//! # Order Ledger
//!
//! Order bookkeeping behind the [`OrderSink`] trait. The ledger keeps, per
//! order:
//!
//! - `order:<orderId>`: the [`StoredOrder`]
//! - `download:<token>`: a [`DownloadGrant`] that expires after a fixed TTL
//!
//! Lookups by customer email and the sales summary are prefix scans over
//! `order:`. Only presence is checked; the checkout's local [`OrderRecord`]
//! stays authoritative whether or not recording succeeds.

use crate::error::{Result, StorefrontError};
use crate::model::{CatalogEntry, OrderRecord};
use crate::store::KeyValueStore;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

pub const ORDER_PREFIX: &str = "order:";
pub const DOWNLOAD_PREFIX: &str = "download:";
pub const DEFAULT_DOWNLOAD_TTL_DAYS: i64 = 7;

/// Receives confirmed orders.
pub trait OrderSink {
    fn record(&mut self, order: &OrderRecord, entry: &CatalogEntry) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    #[serde(flatten)]
    pub order: OrderRecord,
    pub entry_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadGrant {
    pub token: String,
    pub order_id: String,
    pub catalog_entry_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    pub expires_at: DateTime<Utc>,
}

impl DownloadGrant {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesSummary {
    pub order_count: usize,
    pub revenue: Decimal,
    pub orders_by_entry: BTreeMap<String, usize>,
    pub unique_customers: usize,
}

pub struct OrderLedger<S: KeyValueStore> {
    store: S,
    download_ttl: Duration,
}

impl<S: KeyValueStore> OrderLedger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            download_ttl: Duration::days(DEFAULT_DOWNLOAD_TTL_DAYS),
        }
    }

    pub fn with_download_ttl(mut self, ttl: Duration) -> Self {
        self.download_ttl = ttl;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_order(&self, order_id: &str) -> Result<StoredOrder> {
        let json = self
            .store
            .get_item(&format!("{}{}", ORDER_PREFIX, order_id))?
            .ok_or_else(|| StorefrontError::OrderNotFound(order_id.to_string()))?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Resolves a download token, refusing ones past their expiry.
    pub fn get_download(&self, token: &str, now: DateTime<Utc>) -> Result<DownloadGrant> {
        let json = self
            .store
            .get_item(&format!("{}{}", DOWNLOAD_PREFIX, token))?
            .ok_or_else(|| StorefrontError::DownloadNotFound(token.to_string()))?;
        let grant: DownloadGrant = serde_json::from_str(&json)?;
        if grant.is_expired(now) {
            return Err(StorefrontError::DownloadExpired(token.to_string()));
        }
        Ok(grant)
    }

    /// Every stored order, oldest first.
    pub fn orders(&self) -> Result<Vec<StoredOrder>> {
        let mut orders = Vec::new();
        for key in self.store.keys_with_prefix(ORDER_PREFIX)? {
            if let Some(json) = self.store.get_item(&key)? {
                orders.push(serde_json::from_str::<StoredOrder>(&json)?);
            }
        }
        orders.sort_by(|a, b| a.order.created_at.cmp(&b.order.created_at));
        Ok(orders)
    }

    /// Orders placed with `email` (case-insensitive), newest first.
    pub fn orders_for_email(&self, email: &str) -> Result<Vec<StoredOrder>> {
        let email = email.trim().to_lowercase();
        let mut orders: Vec<StoredOrder> = self
            .orders()?
            .into_iter()
            .filter(|o| o.order.customer.email.trim().to_lowercase() == email)
            .collect();
        orders.reverse();
        Ok(orders)
    }

    pub fn summary(&self) -> Result<SalesSummary> {
        let orders = self.orders()?;
        let mut summary = SalesSummary {
            order_count: orders.len(),
            ..SalesSummary::default()
        };
        let mut customers = std::collections::BTreeSet::new();
        for stored in &orders {
            summary.revenue += stored.order.amount_charged;
            *summary
                .orders_by_entry
                .entry(stored.order.catalog_entry_id.clone())
                .or_insert(0) += 1;
            customers.insert(stored.order.customer.email.trim().to_lowercase());
        }
        summary.unique_customers = customers.len();
        Ok(summary)
    }
}

impl<S: KeyValueStore> OrderSink for OrderLedger<S> {
    /// Writes the download grant before the order, so a stored order always
    /// has its grant. A failed order write removes the grant again.
    fn record(&mut self, order: &OrderRecord, entry: &CatalogEntry) -> Result<()> {
        let expires_at = order
            .created_at
            .checked_add_signed(self.download_ttl)
            .ok_or_else(|| {
                StorefrontError::Store(format!(
                    "download expiry out of range for order {}",
                    order.order_id
                ))
            })?;
        let stored = StoredOrder {
            order: order.clone(),
            entry_title: entry.title.clone(),
            download_url: entry.download_url.clone(),
        };
        let grant = DownloadGrant {
            token: order.download_token.clone(),
            order_id: order.order_id.clone(),
            catalog_entry_id: order.catalog_entry_id.clone(),
            download_url: entry.download_url.clone(),
            expires_at,
        };

        let grant_key = format!("{}{}", DOWNLOAD_PREFIX, grant.token);
        self.store
            .set_item(&grant_key, &serde_json::to_string(&grant)?)?;
        let written = serde_json::to_string(&stored)
            .map_err(StorefrontError::from)
            .and_then(|json| {
                self.store
                    .set_item(&format!("{}{}", ORDER_PREFIX, order.order_id), &json)
            });
        if let Err(e) = written {
            if let Err(cleanup) = self.store.remove_item(&grant_key) {
                warn!(token = %grant.token, error = %cleanup, "could not remove orphaned download grant");
            }
            return Err(e);
        }

        debug!(order = %order.order_id, expires = %grant.expires_at, "order recorded");
        Ok(())
    }
}
