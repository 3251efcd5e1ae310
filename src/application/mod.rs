/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! Application layer: API clients, rate limiting and orchestration services

pub mod client;
pub mod interfaces;
pub mod rate_limiter;
pub mod services;
