/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! Submission of normalized transactions to the YNAB budget API

use crate::config::Config;
use crate::constants::USER_AGENT;
use crate::error::AppError;
use crate::model::requests::CreateTransactionsRequest;
use crate::model::responses::CreateTransactionsResponse;
use crate::model::ynab::YnabTransaction;
use reqwest::Client as HttpClient;
use tracing::{error, info};

/// Result of a submission batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Transactions the server accepted as new
    pub sent: usize,
    /// Transactions the server rejected as duplicates of earlier imports
    pub duplicates: usize,
}

/// Client for the YNAB create-transactions endpoint
pub struct YnabClient {
    http_client: HttpClient,
    base_url: String,
    token: String,
    budget_id: String,
}

impl YnabClient {
    /// Creates a client from the configuration
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http_client = HttpClient::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http_client,
            base_url: config.ynab_api.base_url.clone(),
            token: config.credentials.ynab_token.clone(),
            budget_id: config.credentials.budget_id.clone(),
        })
    }

    /// Submits a batch of transactions to the configured budget.
    ///
    /// An empty batch is a no-op. Duplicates are detected server-side from
    /// `import_id`, so resubmitting the same export is safe.
    pub async fn create_transactions(
        &self,
        transactions: &[YnabTransaction],
    ) -> Result<SubmitOutcome, AppError> {
        if transactions.is_empty() {
            info!("No transactions to submit");
            return Ok(SubmitOutcome {
                sent: 0,
                duplicates: 0,
            });
        }

        let url = format!("{}/budgets/{}/transactions", self.base_url, self.budget_id);
        let request = CreateTransactionsRequest { transactions };
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("YNAB submission failed with status {}: {}", status, body);
            return Err(AppError::Unexpected(status));
        }

        let parsed: CreateTransactionsResponse = response.json().await?;
        let duplicates = parsed.data.duplicate_import_ids.len();
        let sent = transactions.len().saturating_sub(duplicates);
        info!(
            "Submitted {} transactions ({} new, {} duplicates)",
            transactions.len(),
            sent,
            duplicates
        );
        Ok(SubmitOutcome { sent, duplicates })
    }
}
