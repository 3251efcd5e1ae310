/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! # Trading 212 to YNAB Bridge
//!
//! Library for moving transaction history from a Trading 212 account into a
//! YNAB budget. It drives the asynchronous Trading 212 export API
//! (request, poll, download), normalizes the resulting CSV into YNAB
//! transactions with deterministic import identities, and submits them in a
//! way that is safe to re-run.
//!
//! ## Structure
//!
//! - `application`: API clients, per-endpoint rate limiting, orchestration
//! - `model`: wire types, transaction records, normalization rules
//! - `utils`: money parsing, import identities, configuration, logging
//!
//! ## Example
//!
//! ```rust,no_run
//! use t212_ynab::config::Config;
//! use t212_ynab::model::transaction::parse_export_csv;
//! use t212_ynab::model::ynab::YnabTransaction;
//!
//! let config = Config::new();
//! let records = parse_export_csv("Action,Time,Total\n").unwrap();
//! let transactions: Vec<_> = records
//!     .iter()
//!     .map(|r| {
//!         YnabTransaction::from_record(
//!             r,
//!             &config.credentials.account_id,
//!             config.import_id_version,
//!         )
//!     })
//!     .collect();
//! ```

/// Application layer: API clients, rate limiting and orchestration services
pub mod application;
/// Environment-driven configuration
pub mod config;
/// Global constants: base URLs, rate limit periods, retry and poll budgets
pub mod constants;
/// Error types for the library
pub mod error;
/// Wire models and transaction normalization
pub mod model;
/// Commonly used types and traits, re-exported for convenience
pub mod prelude;
/// Money parsing, import identities, configuration helpers and logging
pub mod utils;

/// Current version of the crate, taken from the package manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the current version of the crate
#[must_use]
pub fn version() -> &'static str {
    VERSION
}
