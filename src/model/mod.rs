/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 11/2/26
******************************************************************************/

/// HTTP transport with rate limiting and retry
pub mod http;

/// Request payloads for the Trading 212 and YNAB APIs
pub mod requests;

/// Response models for the Trading 212 and YNAB APIs
pub mod responses;

/// Retry policy configuration
pub mod retry;

/// Serde helpers shared by the wire models
pub mod serialization;

/// Raw Trading 212 export records
pub mod transaction;

/// YNAB transaction shape and normalization
pub mod ynab;
