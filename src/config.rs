/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! Environment-driven configuration
//!
//! Credentials and tunables are read from the environment (a `.env` file is
//! loaded if present). Missing credentials do not fail construction; they
//! are validated by the command surface against the selected mode, so a
//! CSV-only run never demands an API token.

use crate::constants::{
    BASE_URL_DEMO, BASE_URL_LIVE, DAYS_TO_BACK_LOOK, IMPORT_ID_VERSION, POLL_BASE_DELAY_SECS,
    POLL_JITTER_SECS, POLL_MAX_ATTEMPTS, YNAB_BASE_URL,
};
use crate::model::retry::RetryConfig;
use crate::utils::config::get_env_or_default;
use dotenv::dotenv;
use tracing::debug;

/// Authentication credentials for the two remote services
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Trading 212 API token
    pub t212_token: String,
    /// YNAB personal access token
    pub ynab_token: String,
    /// YNAB budget to import into
    pub budget_id: String,
    /// YNAB account the transactions belong to
    pub account_id: String,
}

/// Configuration for the Trading 212 REST API
#[derive(Debug, Clone)]
pub struct RestApiConfig {
    /// Base URL (live or demo environment)
    pub base_url: String,
}

/// Configuration for the YNAB API
#[derive(Debug, Clone)]
pub struct YnabApiConfig {
    /// Base URL for the YNAB API
    pub base_url: String,
}

/// Configuration for the export poll loop
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Maximum number of status checks before timing out
    pub max_attempts: u32,
    /// Base delay in seconds between status checks
    pub base_delay_secs: u64,
    /// Upper bound in seconds of the random jitter between checks
    pub jitter_secs: u64,
}

/// Main configuration for the Trading 212 → YNAB bridge
#[derive(Debug, Clone)]
pub struct Config {
    /// Authentication credentials
    pub credentials: Credentials,
    /// Trading 212 REST API configuration
    pub rest_api: RestApiConfig,
    /// YNAB API configuration
    pub ynab_api: YnabApiConfig,
    /// Export poll loop configuration
    pub poll: PollConfig,
    /// Transient-failure retry policy
    pub retry: RetryConfig,
    /// Days to look back when no explicit window is given
    pub days_to_look_back: i64,
    /// Active import identity scheme version
    pub import_id_version: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration for the live environment from the environment
    /// variables (loading `.env` first when present)
    #[must_use]
    pub fn new() -> Self {
        Self::with_demo(false)
    }

    /// Creates a configuration, selecting the demo environment when asked
    #[must_use]
    pub fn with_demo(use_demo: bool) -> Self {
        match dotenv() {
            Ok(_) => debug!("Loaded .env file"),
            Err(e) => debug!("No .env file loaded: {e}"),
        }

        let t212_token = get_env_or_default("TRADING212_TOKEN", String::new());
        if t212_token.is_empty() {
            debug!("TRADING212_TOKEN not set; API fetch will be unavailable");
        }

        let default_base = if use_demo { BASE_URL_DEMO } else { BASE_URL_LIVE };

        Config {
            credentials: Credentials {
                t212_token,
                ynab_token: get_env_or_default("YNAB_TOKEN", String::new()),
                budget_id: get_env_or_default("BUDGET", String::new()),
                account_id: get_env_or_default("ACCOUNT", String::new()),
            },
            rest_api: RestApiConfig {
                base_url: get_env_or_default("T212_BASE_URL", default_base.to_string()),
            },
            ynab_api: YnabApiConfig {
                base_url: get_env_or_default("YNAB_BASE_URL", YNAB_BASE_URL.to_string()),
            },
            poll: PollConfig {
                max_attempts: get_env_or_default("POLL_MAX_ATTEMPTS", POLL_MAX_ATTEMPTS),
                base_delay_secs: get_env_or_default("POLL_BASE_DELAY_SECS", POLL_BASE_DELAY_SECS),
                jitter_secs: get_env_or_default("POLL_JITTER_SECS", POLL_JITTER_SECS),
            },
            retry: RetryConfig::default(),
            days_to_look_back: get_env_or_default("T212_DAYS_LOOKBACK", DAYS_TO_BACK_LOOK),
            import_id_version: get_env_or_default("IMPORT_ID_VERSION", IMPORT_ID_VERSION),
        }
    }
}
