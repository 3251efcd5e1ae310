/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 11/2/26
******************************************************************************/

//! Response models for the Trading 212 and YNAB APIs

use serde::Deserialize;
use std::fmt;

/// Response to an export creation request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequestResponse {
    /// Identifier of the created export job, if the service assigned one
    #[serde(default)]
    pub report_id: Option<i64>,
}

/// Status vocabulary reported by the export list endpoint.
///
/// Only `Finished` and `Failed` are terminal; everything else (including
/// labels introduced after this was written) keeps the poll loop going
/// until the attempt budget runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ExportStatus {
    /// Waiting to be processed
    Queued,
    /// Being processed
    Processing,
    /// Still generating the export file
    Running,
    /// Export complete, download link available
    Finished,
    /// Export failed server-side
    Failed,
    /// Export canceled server-side
    Canceled,
    /// Any status outside the known vocabulary
    #[serde(other)]
    Unknown,
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportStatus::Queued => "Queued",
            ExportStatus::Processing => "Processing",
            ExportStatus::Running => "Running",
            ExportStatus::Finished => "Finished",
            ExportStatus::Failed => "Failed",
            ExportStatus::Canceled => "Canceled",
            ExportStatus::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// One export job as returned by the export list endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJob {
    /// Server-assigned job identifier
    pub report_id: i64,
    /// Current job status
    pub status: ExportStatus,
    /// Retrieval link, present once the job is finished
    #[serde(default)]
    pub download_link: Option<String>,
}

/// Response from the YNAB create-transactions endpoint.
///
/// Only the duplicate list is inspected; the submitted transactions are
/// never mutated based on this response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTransactionsResponse {
    /// Response payload wrapper
    #[serde(default)]
    pub data: TransactionsData,
}

/// Payload of a create-transactions response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionsData {
    /// Import identities the server considered duplicates of earlier imports
    #[serde(default)]
    pub duplicate_import_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_job_deserialization() {
        let json = r#"{"reportId": 42, "status": "Finished", "downloadLink": "https://example.com/export.csv"}"#;
        let job: ExportJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.report_id, 42);
        assert_eq!(job.status, ExportStatus::Finished);
        assert_eq!(
            job.download_link.as_deref(),
            Some("https://example.com/export.csv")
        );
    }

    #[test]
    fn test_pending_job_has_no_link() {
        let json = r#"{"reportId": 42, "status": "Processing"}"#;
        let job: ExportJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.status, ExportStatus::Processing);
        assert_eq!(job.download_link, None);
    }

    #[test]
    fn test_unknown_status_label() {
        let json = r#"{"reportId": 42, "status": "Archived"}"#;
        let job: ExportJob = serde_json::from_str(json).unwrap();
        assert_eq!(job.status, ExportStatus::Unknown);
    }

    #[test]
    fn test_missing_report_id_in_request_response() {
        let response: ExportRequestResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.report_id, None);
    }

    #[test]
    fn test_duplicate_import_ids_parse() {
        let json = r#"{"data": {"duplicate_import_ids": ["T212-v15:a", "T212-v15:b"]}}"#;
        let response: CreateTransactionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.duplicate_import_ids.len(), 2);
    }
}
