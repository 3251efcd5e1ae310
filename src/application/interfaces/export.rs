/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/
use crate::error::AppError;
use crate::model::requests::ExportRequest;
use crate::model::responses::{ExportJob, ExportRequestResponse};
use async_trait::async_trait;

/// Interface to the Trading 212 export endpoints
///
/// The acquisition orchestrator works against this seam, so the poll loop
/// can be exercised with an in-memory implementation in tests.
#[async_trait]
pub trait ExportApi: Send + Sync {
    /// Requests a new export of transaction data for a time window
    async fn request_export(
        &self,
        request: &ExportRequest,
    ) -> Result<ExportRequestResponse, AppError>;

    /// Lists all known export jobs with their current status
    async fn list_exports(&self) -> Result<Vec<ExportJob>, AppError>;

    /// Downloads the raw CSV content behind a retrieval link.
    ///
    /// The link is served outside the API, so implementations fetch it
    /// directly without going through the endpoint rate limiter.
    async fn download_csv(&self, link: &str) -> Result<String, AppError>;
}
