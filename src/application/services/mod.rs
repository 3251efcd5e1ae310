/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! Orchestration services built on top of the API clients

pub mod export_service;
pub mod ynab_service;

pub use export_service::{resolve_window, ExportFetcher};
pub use ynab_service::{SubmitOutcome, YnabClient};
