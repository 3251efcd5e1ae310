/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 10/2/26
******************************************************************************/

//! Error types for the Trading 212 → YNAB bridge

use reqwest::StatusCode;
use std::fmt;

/// Convenience alias for results produced by this crate
pub type T212Result<T> = Result<T, AppError>;

/// Main error type for the library
///
/// Protocol failures (missing report id, vanished export, explicit failure,
/// poll timeout) abort the acquisition and are never retried; transient
/// network failures are retried by the transport before surfacing here.
#[derive(Debug)]
pub enum AppError {
    /// Transport-level failure from reqwest
    Network(reqwest::Error),
    /// CSV parsing failure
    Csv(csv::Error),
    /// JSON serialization or deserialization failure
    Json(serde_json::Error),
    /// Filesystem failure
    Io(std::io::Error),
    /// Invalid caller-supplied input, reported before any network activity
    InvalidInput(String),
    /// The remote service rejected the credentials
    Unauthorized,
    /// A non-success response that is not retryable
    Unexpected(StatusCode),
    /// The export request response did not contain a report id
    MissingReportId,
    /// A previously created export disappeared from the export list
    ExportNotFound(i64),
    /// The remote service reported the export as failed
    ExportFailed,
    /// The export did not reach a terminal status within the poll budget
    ExportTimedOut(u32),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "network error: {e}"),
            AppError::Csv(e) => write!(f, "CSV error: {e}"),
            AppError::Json(e) => write!(f, "JSON error: {e}"),
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            AppError::Unauthorized => write!(f, "unauthorized"),
            AppError::Unexpected(status) => write!(f, "unexpected response status: {status}"),
            AppError::MissingReportId => {
                write!(f, "failed to get reportId from export request")
            }
            AppError::ExportNotFound(id) => {
                write!(f, "could not find export with reportId {id}")
            }
            AppError::ExportFailed => write!(f, "export failed on Trading 212 server"),
            AppError::ExportTimedOut(attempts) => {
                write!(f, "export did not complete within {attempts} status checks")
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::Csv(e) => Some(e),
            AppError::Json(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e)
    }
}

impl From<csv::Error> for AppError {
    fn from(e: csv::Error) -> Self {
        AppError::Csv(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Io(e)
    }
}
