/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 10/2/26
******************************************************************************/

/// Environment variable helpers
pub mod config;

/// Versioned import identity derivation
pub mod import_id;

/// Tracing subscriber setup
pub mod logger;

/// Milliunit money parsing
pub mod money;
