/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 11/2/26
******************************************************************************/
use crate::constants::{MAX_TRANSIENT_RETRIES, RETRY_BASE_DELAY_SECS};
use crate::utils::config::get_env_or_default;
use std::time::Duration;

/// Configuration for retrying transient HTTP failures
///
/// This policy is bounded: after `max_retries` failed attempts the last
/// failure is surfaced to the caller. Throttling responses follow a separate,
/// unbounded policy because the server dictates the pace there.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of attempts before giving up
    pub max_retries: u32,
    /// Base delay in seconds; doubles on each failed attempt
    pub base_delay_secs: u64,
}

impl RetryConfig {
    /// Creates a retry configuration with a custom attempt budget
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay_secs: RETRY_BASE_DELAY_SECS,
        }
    }

    /// Creates a retry configuration with a custom base delay
    #[must_use]
    pub fn with_base_delay(base_delay_secs: u64) -> Self {
        Self {
            max_retries: MAX_TRANSIENT_RETRIES,
            base_delay_secs,
        }
    }

    /// Exponential backoff delay for a zero-based attempt index, without jitter
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let factor = 2u64.saturating_pow(attempt);
        Duration::from_secs(self.base_delay_secs.saturating_mul(factor))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: get_env_or_default("MAX_RETRY_COUNT", MAX_TRANSIENT_RETRIES),
            base_delay_secs: get_env_or_default("RETRY_BASE_DELAY_SECS", RETRY_BASE_DELAY_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_delay_doubles() {
        let retry = RetryConfig::with_base_delay(2);
        assert_eq!(retry.backoff_delay(0), Duration::from_secs(2));
        assert_eq!(retry.backoff_delay(1), Duration::from_secs(4));
        assert_eq!(retry.backoff_delay(3), Duration::from_secs(16));
    }

    #[test]
    fn test_backoff_delay_saturates() {
        let retry = RetryConfig::with_base_delay(u64::MAX);
        assert_eq!(retry.backoff_delay(10), Duration::from_secs(u64::MAX));
    }
}
