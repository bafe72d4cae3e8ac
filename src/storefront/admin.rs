//! # Admin Console
//!
//! The catalog management surface: a dashboard, an add/edit form and a manage
//! list, all behind a [`PinGate`].
//!
//! **The PIN gate is not access control.** It compares a string held in
//! process memory against a configured constant, with no session, no rate
//! limit and no server involved. Anyone who can run the binary can read the
//! configured PIN. It exists to keep casual users out of the admin views and
//! provides no security guarantee; exposing admin operations over a network
//! would need real authentication instead.

use crate::catalog::CatalogRepository;
use crate::error::{Result, StorefrontError};
use crate::model::CatalogEntry;
use crate::store::KeyValueStore;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::info;

pub const DEFAULT_ADMIN_PIN: &str = "2024";

/// In-memory UI gate. Locked until [`PinGate::unlock`] sees the right PIN.
#[derive(Debug, Clone)]
pub struct PinGate {
    pin: String,
    authenticated: bool,
}

impl PinGate {
    pub fn new(pin: impl Into<String>) -> Self {
        Self {
            pin: pin.into(),
            authenticated: false,
        }
    }

    /// Returns whether the gate is now open. A wrong PIN leaves it locked
    /// (and re-locks an open gate).
    pub fn unlock(&mut self, input: &str) -> bool {
        self.authenticated = !self.pin.is_empty() && input.trim() == self.pin;
        if !self.authenticated {
            info!("admin PIN rejected");
        }
        self.authenticated
    }

    pub fn lock(&mut self) {
        self.authenticated = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn ensure_unlocked(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(StorefrontError::AdminLocked)
        }
    }
}

impl Default for PinGate {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_PIN)
    }
}

/// Aggregate counts for the dashboard view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub total: usize,
    pub built_in: usize,
    pub user_added: usize,
    pub featured: usize,
    pub by_category: BTreeMap<String, usize>,
    pub average_price: Decimal,
}

/// One row of the manage list.
#[derive(Debug, Clone, PartialEq)]
pub struct ManagedEntry {
    pub entry: CatalogEntry,
    pub built_in: bool,
}

impl ManagedEntry {
    pub fn deletable(&self) -> bool {
        !self.built_in
    }

    pub fn editable(&self) -> bool {
        !self.built_in
    }
}

pub fn dashboard<S: KeyValueStore>(repo: &CatalogRepository<S>) -> Dashboard {
    let entries = repo.all();
    let mut dash = Dashboard {
        total: entries.len(),
        ..Dashboard::default()
    };

    let mut price_sum = Decimal::ZERO;
    for entry in &entries {
        if repo.is_builtin(&entry.id) {
            dash.built_in += 1;
        } else {
            dash.user_added += 1;
        }
        if entry.flags.is_featured {
            dash.featured += 1;
        }
        *dash.by_category.entry(entry.category.clone()).or_insert(0) += 1;
        price_sum += entry.price;
    }
    if !entries.is_empty() {
        dash.average_price = (price_sum / Decimal::from(entries.len())).round_dp(2);
    }
    dash
}

pub fn manage_list<S: KeyValueStore>(repo: &CatalogRepository<S>) -> Vec<ManagedEntry> {
    repo.all()
        .into_iter()
        .map(|entry| ManagedEntry {
            built_in: repo.is_builtin(&entry.id),
            entry,
        })
        .collect()
}
