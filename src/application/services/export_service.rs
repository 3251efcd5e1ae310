/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! Export orchestration: date window resolution and the request/poll/download
//! cycle that turns a date range into raw CSV content.

use crate::application::interfaces::ExportApi;
use crate::config::PollConfig;
use crate::error::AppError;
use crate::model::requests::ExportRequest;
use crate::model::responses::ExportStatus;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Resolves the export date window from the user's inputs.
///
/// An explicit start date takes precedence over a day count, which in turn
/// takes precedence over the default lookback. A day count must be positive.
/// The window always ends at `now` and starts at the beginning of the chosen
/// day in UTC.
pub fn resolve_window(
    start_date: Option<&str>,
    days: Option<i64>,
    now: DateTime<Utc>,
    default_lookback_days: i64,
) -> Result<(DateTime<Utc>, DateTime<Utc>), AppError> {
    let from = if let Some(text) = start_date {
        let date = NaiveDate::parse_from_str(text, "%d/%m/%Y").map_err(|_| {
            AppError::InvalidInput(format!(
                "Invalid date format '{text}', expected DD/MM/YYYY"
            ))
        })?;
        date.and_time(NaiveTime::MIN).and_utc()
    } else {
        if let Some(count) = days {
            if count <= 0 {
                return Err(AppError::InvalidInput(format!(
                    "Day count must be positive, got {count}"
                )));
            }
        }
        let lookback = days.unwrap_or(default_lookback_days);
        let day = (now - chrono::Duration::days(lookback)).date_naive();
        day.and_time(NaiveTime::MIN).and_utc()
    };
    Ok((from, now))
}

/// Drives an export through its full lifecycle against a Trading 212 API.
///
/// Generic over [`ExportApi`] so the polling logic is testable without a
/// live server.
pub struct ExportFetcher<T: ExportApi> {
    api: Arc<T>,
    poll: PollConfig,
}

impl<T: ExportApi> ExportFetcher<T> {
    /// Creates a fetcher around an API client
    pub fn new(api: Arc<T>, poll: PollConfig) -> Self {
        Self { api, poll }
    }

    /// Requests an export for the given window, polls until it finishes and
    /// downloads the resulting CSV.
    ///
    /// Only `Finished` and `Failed` are terminal: every other status, unknown
    /// ones included, keeps the poll loop going until the attempt budget runs
    /// out. A `Finished` job whose download link has not materialised yet is
    /// also treated as still pending.
    pub async fn fetch_csv(
        &self,
        from: &DateTime<Utc>,
        to: &DateTime<Utc>,
    ) -> Result<String, AppError> {
        let request = ExportRequest::new(from, to);
        let response = self.api.request_export(&request).await?;
        let report_id = response.report_id.ok_or(AppError::MissingReportId)?;
        info!("Export requested, report id {}", report_id);

        for attempt in 1..=self.poll.max_attempts {
            info!(
                "Polling export {} (attempt {}/{})",
                report_id, attempt, self.poll.max_attempts
            );
            let jobs = self.api.list_exports().await?;
            let job = jobs
                .into_iter()
                .find(|job| job.report_id == report_id)
                .ok_or(AppError::ExportNotFound(report_id))?;
            debug!("Export {} status: {}", report_id, job.status);

            match job.status {
                ExportStatus::Finished => {
                    if let Some(link) = job.download_link {
                        info!("Export {} finished, downloading", report_id);
                        return self.api.download_csv(&link).await;
                    }
                }
                ExportStatus::Failed => return Err(AppError::ExportFailed),
                _ => {}
            }

            if attempt < self.poll.max_attempts {
                tokio::time::sleep(self.poll_delay()).await;
            }
        }
        Err(AppError::ExportTimedOut(self.poll.max_attempts))
    }

    fn poll_delay(&self) -> Duration {
        let jitter = if self.poll.jitter_secs == 0 {
            0.0
        } else {
            rand::thread_rng().gen_range(0.0..self.poll.jitter_secs as f64)
        };
        Duration::from_secs_f64(self.poll.base_delay_secs as f64 + jitter)
    }
}
