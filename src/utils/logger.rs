/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 10/2/26
******************************************************************************/

//! Logging setup backed by `tracing-subscriber`

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// The log level is taken from `RUST_LOG` when set, defaulting to `info`.
/// Calling this more than once is harmless; subsequent calls are no-ops.
pub fn setup_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
