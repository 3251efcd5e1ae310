/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! # Bridge Prelude
//!
//! This module provides a convenient way to import the most commonly used
//! types and traits from the library. By importing this prelude, you get
//! access to all the essential components needed to fetch, normalize and
//! submit transactions.
//!
//! ## Usage
//!
//! ```rust
//! use t212_ynab::prelude::*;
//!
//! // Now you have access to all the commonly used types and traits
//! let config = Config::new();
//! // ... etc
//! ```

// ============================================================================
// CORE CONFIGURATION AND SETUP
// ============================================================================

/// Configuration for the bridge
pub use crate::config::{Config, Credentials, PollConfig, RestApiConfig, YnabApiConfig};

/// Library version information
pub use crate::{VERSION, version};

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Main error type for the library
pub use crate::error::{AppError, T212Result};

// ============================================================================
// CORE SERVICES (TRAITS)
// ============================================================================

/// Export API trait for the request/poll/download cycle
pub use crate::application::interfaces::ExportApi;

// ============================================================================
// SERVICE IMPLEMENTATIONS
// ============================================================================

/// Trading 212 export API client
pub use crate::application::client::Trading212Client;

/// Export orchestration: window resolution and the fetch cycle
pub use crate::application::services::{resolve_window, ExportFetcher};

/// YNAB submission client
pub use crate::application::services::{SubmitOutcome, YnabClient};

// ============================================================================
// RATE LIMITING AND RETRY
// ============================================================================

/// Per-endpoint rate limiting
pub use crate::application::rate_limiter::{EndpointRateLimiter, EndpointRule};

/// Retry policy for transient failures
pub use crate::model::retry::RetryConfig;

// ============================================================================
// TRANSACTION MODELS
// ============================================================================

/// Raw export records and the action vocabulary
pub use crate::model::transaction::{
    filter_by_action, parse_export_csv, Action, RawTransactionRecord,
};

/// Normalized YNAB transaction
pub use crate::model::ynab::YnabTransaction;

/// Request and response wire types
pub use crate::model::requests::{CreateTransactionsRequest, DataIncluded, ExportRequest};
pub use crate::model::responses::{
    CreateTransactionsResponse, ExportJob, ExportRequestResponse, ExportStatus,
};

/// Serialization utilities
pub use crate::model::serialization::option_string_empty_as_none;

// ============================================================================
// UTILITIES
// ============================================================================

/// Money parsing with degradation notes
pub use crate::utils::money::{parse_money, Parsed};

/// Deterministic import identities
pub use crate::utils::import_id::make_import_id;

/// Logging utilities
pub use crate::utils::logger::setup_logger;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Global constants
pub use crate::constants::*;

// ============================================================================
// RE-EXPORTS FROM EXTERNAL CRATES
// ============================================================================

/// Re-export commonly used external types
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use std::sync::Arc;
pub use tokio;
pub use tracing::{debug, error, info, warn};

/// Re-export chrono for date/time handling
pub use chrono::{DateTime, Utc};

/// Re-export reqwest for HTTP operations (if needed for custom implementations)
pub use reqwest::Method;
