//! # Storefront Architecture
//!
//! Storefront is a **UI-agnostic template catalog library**: a merged catalog
//! of built-in and user-added website templates, filtering and search, a
//! PIN-gated admin console and a simulated three-step checkout. The binary is
//! one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Sets up tracing and the tokio runtime for checkout       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns the admin PIN gate       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Returns CmdResult: data plus user-facing messages        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Domain (catalog/, filter, checkout/, admin, orders/)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - KeyValueStore trait, a local-storage style string map    │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; the CLI decides where they land.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per user-facing operation
//! - [`catalog`]: Built-in entries, user-entry persistence and the merged repository
//! - [`filter`]: Category/text/price/tag/difficulty filtering and sorting
//! - [`checkout`]: The purchase wizard and the payment processor seam
//! - [`admin`]: PIN gate, dashboard and manage list
//! - [`orders`]: Order ledger with download tokens
//! - [`validation`]: The one entry/customer/payment validator
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod admin;
pub mod api;
pub mod catalog;
pub mod checkout;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod init;
pub mod model;
pub mod orders;
pub mod store;
pub mod validation;
