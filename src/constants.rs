/// Base URL for the Trading 212 live environment
pub const BASE_URL_LIVE: &str = "https://live.trading212.com/api/v0";
/// Base URL for the Trading 212 demo environment
pub const BASE_URL_DEMO: &str = "https://demo.trading212.com/api/v0";
/// Base URL for the YNAB API
pub const YNAB_BASE_URL: &str = "https://api.ynab.com/v1";
/// Endpoint used to create and list transaction exports
pub const EXPORTS_ENDPOINT: &str = "/history/exports";
/// Rate limit for creating exports: 1 request per 30 seconds
pub const EXPORT_CREATE_PERIOD_SECS: u64 = 30;
/// Rate limit for listing exports: 1 request per 60 seconds
pub const EXPORT_LIST_PERIOD_SECS: u64 = 60;
/// Safety buffer in seconds added on top of rate-limit waits
/// This provides extra margin to ensure rate limits are not exceeded
pub const RATE_LIMIT_BUFFER_SECS: u64 = 1;
/// Maximum number of attempts for transient request failures
pub const MAX_TRANSIENT_RETRIES: u32 = 5;
/// Base delay in seconds for exponential backoff between retries
pub const RETRY_BASE_DELAY_SECS: u64 = 2;
/// Maximum number of export status polls before giving up
pub const POLL_MAX_ATTEMPTS: u32 = 30;
/// Base delay in seconds between export status polls
pub const POLL_BASE_DELAY_SECS: u64 = 15;
/// Upper bound in seconds of the random jitter added between polls
pub const POLL_JITTER_SECS: u64 = 5;
/// Default number of days to look back when no date window is given
pub const DAYS_TO_BACK_LOOK: i64 = 365;
/// Current import identity scheme version; bump to force new import IDs
pub const IMPORT_ID_VERSION: u32 = 15;
/// Fixed literal tag prefixed to every import identity
pub const IMPORT_ID_PREFIX: &str = "T212-";
/// Maximum import identity length accepted by YNAB
pub const IMPORT_ID_MAX_LEN: usize = 36;
/// User agent string used in HTTP requests to identify this client
pub const USER_AGENT: &str = "t212-ynab/0.1.0";
