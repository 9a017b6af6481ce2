//! Beszel client — typed REST client for a Beszel monitoring hub
//!
//! The hub exposes a PocketBase-style collection API. This crate wraps it in
//! layers:
//!
//! - **Transport** — one pooled blocking HTTP connection, JSON bodies, raw
//!   token in the `Authorization` header, non-2xx mapped to typed errors.
//! - **Collections** — `list` / `get` / `create` / `update` / `delete` on any
//!   collection with filter, sort, pagination and expansion.
//! - **Domain accessors** — systems, system stats, container stats,
//!   containers, alerts and alert history.
//! - **Auth** — password login, token refresh, current user.
//!
//! # Quick Start
//!
//! ```no_run
//! use beszel::{BeszelClient, RecordExt};
//!
//! let mut client = BeszelClient::new("https://hub.example.com", None).unwrap();
//! client.login("admin@example.com", "secret").unwrap();
//!
//! for system in client.get_systems("").unwrap() {
//!     println!("{} {}", system.display_field("name"), system.display_field("status"));
//! }
//! client.close();
//! ```

pub mod auth;
pub mod client;
pub mod collection;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod transport;

#[cfg(test)]
mod testing;

// ============================================================
// Core client types
// ============================================================

pub use client::BeszelClient;
pub use collection::{ListQuery, DEFAULT_PAGE, DEFAULT_PER_PAGE};
pub use error::{BeszelError, BeszelResult};
pub use models::{AuthResponse, CollectionResult, Record, RecordExt, RecordType};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport, REQUEST_TIMEOUT};

// ============================================================
// Domain accessor constants
// ============================================================

pub use domain::alerts::{ALERT_EXPAND, DEFAULT_HISTORY_PER_PAGE};
pub use domain::stats::DEFAULT_STATS_PER_PAGE;
pub use domain::{collections, system_filter, system_stats_filter};

// ============================================================
// Configuration
// ============================================================

pub use config::{ClientConfig, ConfigStore, StoredConfig};

// ============================================================
// Version
// ============================================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
