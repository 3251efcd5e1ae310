/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! Client for the Trading 212 export API

use crate::application::interfaces::ExportApi;
use crate::application::rate_limiter::EndpointRateLimiter;
use crate::config::Config;
use crate::constants::{EXPORTS_ENDPOINT, USER_AGENT};
use crate::error::AppError;
use crate::model::http::send_with_retry;
use crate::model::requests::ExportRequest;
use crate::model::responses::{ExportJob, ExportRequestResponse};
use crate::model::retry::RetryConfig;
use async_trait::async_trait;
use reqwest::{Client as HttpClient, Method};
use tracing::error;

/// Client for the Trading 212 export API.
///
/// Owns the per-endpoint rate limiter, so all export-request and
/// export-list calls made through one client instance share a single
/// last-call ledger. The direct download of a finished export bypasses
/// the limiter, since it is served outside the API.
pub struct Trading212Client {
    http_client: HttpClient,
    base_url: String,
    api_token: String,
    rate_limiter: EndpointRateLimiter,
    retry: RetryConfig,
}

impl Trading212Client {
    /// Creates a client from the configuration
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http_client = HttpClient::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http_client,
            base_url: config.rest_api.base_url.clone(),
            api_token: config.credentials.t212_token.clone(),
            rate_limiter: EndpointRateLimiter::for_export_api(),
            retry: config.retry.clone(),
        })
    }

    fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", self.api_token.clone()),
            ("Accept", "application/json".to_string()),
        ]
    }
}

#[async_trait]
impl ExportApi for Trading212Client {
    async fn request_export(
        &self,
        request: &ExportRequest,
    ) -> Result<ExportRequestResponse, AppError> {
        let response = send_with_retry(
            &self.http_client,
            &self.rate_limiter,
            &self.retry,
            Method::POST,
            &self.base_url,
            EXPORTS_ENDPOINT,
            &self.headers(),
            Some(request),
        )
        .await?;
        Ok(response.json().await?)
    }

    async fn list_exports(&self) -> Result<Vec<ExportJob>, AppError> {
        let response = send_with_retry(
            &self.http_client,
            &self.rate_limiter,
            &self.retry,
            Method::GET,
            &self.base_url,
            EXPORTS_ENDPOINT,
            &self.headers(),
            None::<&()>,
        )
        .await?;
        Ok(response.json().await?)
    }

    async fn download_csv(&self, link: &str) -> Result<String, AppError> {
        let response = self.http_client.get(link).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Export download failed with status {}: {}", status, body);
            return Err(AppError::Unexpected(status));
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn client_for(base_url: &str) -> Trading212Client {
        let mut config = Config::new();
        config.rest_api.base_url = base_url.to_string();
        config.credentials.t212_token = "test-token".to_string();
        config.retry = RetryConfig::with_max_retries(1);
        Trading212Client::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_request_export_sends_window_and_inclusion_set() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/history/exports")
            .match_header("Authorization", "test-token")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"dataIncluded": {"includeDividends": true}}"#.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"reportId": 7}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let request = ExportRequest::new(&chrono::Utc::now(), &chrono::Utc::now());
        let response = client.request_export(&request).await.unwrap();

        assert_eq!(response.report_id, Some(7));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_exports_parses_jobs() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/history/exports")
            .with_status(200)
            .with_body(r#"[{"reportId": 7, "status": "Processing"}]"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let jobs = client.list_exports().await.unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].report_id, 7);
    }

    #[tokio::test]
    async fn test_download_csv_returns_raw_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/exports/7.csv")
            .with_status(200)
            .with_body("Action,Time,Total\n")
            .create_async()
            .await;

        let client = client_for(&server.url());
        let link = format!("{}/exports/7.csv", server.url());
        let content = client.download_csv(&link).await.unwrap();
        assert_eq!(content, "Action,Time,Total\n");
    }
}
