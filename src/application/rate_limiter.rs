/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! Per-endpoint rate limiting for the Trading 212 export API
//!
//! Trading 212 enforces strict per-endpoint limits (one export creation per
//! 30 seconds, one export listing per 60 seconds). The limiter keeps a
//! ledger of the most recent call per endpoint and sleeps out the remaining
//! interval, plus a small buffer, before the next call to a limited
//! endpoint. Endpoints without a configured rule are not throttled here.

use crate::constants::{
    EXPORT_CREATE_PERIOD_SECS, EXPORT_LIST_PERIOD_SECS, EXPORTS_ENDPOINT, RATE_LIMIT_BUFFER_SECS,
};
use reqwest::Method;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

/// Rate limit rule for one endpoint: `max_requests` per `period`
#[derive(Debug, Clone)]
pub struct EndpointRule {
    /// Number of requests allowed per period
    pub max_requests: u32,
    /// Length of the period
    pub period: Duration,
}

impl EndpointRule {
    /// Minimum interval between two consecutive calls under this rule
    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.period / self.max_requests.max(1)
    }
}

/// Ledger-based rate limiter keyed by endpoint.
///
/// The ledger maps an endpoint key (`"METHOD /path"`, query string stripped)
/// to the instant of its most recent call. Entries appear on first call and
/// are updated after every attempt, throttled ones included; they are never
/// cleared for the lifetime of the owning client. The internal mutex makes
/// a client shared across tasks safe, although the acquisition flow itself
/// is strictly sequential.
pub struct EndpointRateLimiter {
    rules: HashMap<String, EndpointRule>,
    last_call: Mutex<HashMap<String, Instant>>,
    buffer: Duration,
}

impl EndpointRateLimiter {
    /// Creates a limiter with the given per-endpoint rules
    #[must_use]
    pub fn new(rules: HashMap<String, EndpointRule>) -> Self {
        Self {
            rules,
            last_call: Mutex::new(HashMap::new()),
            buffer: Duration::from_secs(RATE_LIMIT_BUFFER_SECS),
        }
    }

    /// Creates a limiter preconfigured with the Trading 212 export limits
    #[must_use]
    pub fn for_export_api() -> Self {
        let mut rules = HashMap::new();
        rules.insert(
            format!("POST {EXPORTS_ENDPOINT}"),
            EndpointRule {
                max_requests: 1,
                period: Duration::from_secs(EXPORT_CREATE_PERIOD_SECS),
            },
        );
        rules.insert(
            format!("GET {EXPORTS_ENDPOINT}"),
            EndpointRule {
                max_requests: 1,
                period: Duration::from_secs(EXPORT_LIST_PERIOD_SECS),
            },
        );
        Self::new(rules)
    }

    /// Builds the ledger key for a request: method plus path with the query
    /// string stripped
    #[must_use]
    pub fn endpoint_key(method: &Method, path: &str) -> String {
        let path = path.split('?').next().unwrap_or(path);
        format!("{method} {path}")
    }

    /// Time left before the endpoint may be called again, including the
    /// safety buffer. `None` means the call may proceed immediately.
    #[must_use]
    pub fn time_until_allowed(&self, key: &str) -> Option<Duration> {
        let rule = self.rules.get(key)?;
        let ledger = self.last_call.lock().unwrap_or_else(|e| e.into_inner());
        let last = ledger.get(key)?;

        let elapsed = last.elapsed();
        let interval = rule.min_interval();
        if elapsed < interval {
            Some(interval - elapsed + self.buffer)
        } else {
            None
        }
    }

    /// Records a call to the endpoint in the ledger
    pub fn record_call(&self, key: &str) {
        let mut ledger = self.last_call.lock().unwrap_or_else(|e| e.into_inner());
        ledger.insert(key.to_string(), Instant::now());
    }

    /// Waits until the endpoint's configured interval has elapsed since its
    /// last recorded call. Returns immediately for unlimited endpoints.
    pub async fn acquire(&self, key: &str) {
        if let Some(wait) = self.time_until_allowed(key) {
            info!(
                "Rate limit: waiting {:.1} seconds before next request to {}",
                wait.as_secs_f64(),
                key
            );
            tokio::time::sleep(wait).await;
        }
    }
}

impl std::fmt::Debug for EndpointRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointRateLimiter")
            .field("rules", &self.rules)
            .finish()
    }
}
