/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! Command-line entry point for the Trading 212 to YNAB bridge

use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use t212_ynab::application::client::Trading212Client;
use t212_ynab::application::services::{resolve_window, ExportFetcher, YnabClient};
use t212_ynab::config::Config;
use t212_ynab::error::AppError;
use t212_ynab::model::transaction::{filter_by_action, parse_export_csv, Action};
use t212_ynab::model::ynab::YnabTransaction;
use t212_ynab::utils::logger::setup_logger;
use tracing::{error, info};

/// Convert Trading 212 transaction history into YNAB transactions
#[derive(Debug, Parser)]
#[command(name = "t212-ynab", version, about)]
struct Cli {
    /// Read transactions from a local export CSV instead of the API
    #[arg(long, conflicts_with = "fetch")]
    csv: Option<PathBuf>,

    /// Fetch transactions through the export API
    #[arg(long)]
    fetch: bool,

    /// Use the demo environment instead of the live one
    #[arg(long)]
    demo: bool,

    /// Number of days to look back when fetching
    #[arg(long, conflicts_with = "start_date")]
    days: Option<i64>,

    /// Start of the fetch window as DD/MM/YYYY
    #[arg(long)]
    start_date: Option<String>,

    /// Save the raw downloaded CSV to this path, unmodified
    #[arg(long)]
    save_raw_csv: Option<PathBuf>,

    /// Keep only transactions with these action labels
    #[arg(long, num_args = 1..)]
    filter: Vec<String>,

    /// Write the normalized transactions to this path as JSON
    #[arg(long)]
    output: Option<PathBuf>,

    /// Submit the normalized transactions to YNAB
    #[arg(long)]
    send: bool,

    /// Override the import identity version
    #[arg(long)]
    id_version: Option<u32>,
}

#[tokio::main]
async fn main() {
    setup_logger();
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    if cli.csv.is_none() && !cli.fetch {
        return Err(AppError::InvalidInput(
            "Either --csv or --fetch must be given".to_string(),
        ));
    }

    let filter_actions = parse_filter_labels(&cli.filter)?;
    let config = Config::with_demo(cli.demo);

    if cli.fetch && config.credentials.t212_token.is_empty() {
        return Err(AppError::InvalidInput(
            "TRADING212_TOKEN must be set to fetch from the API".to_string(),
        ));
    }
    if cli.send
        && (config.credentials.ynab_token.is_empty()
            || config.credentials.budget_id.is_empty()
            || config.credentials.account_id.is_empty())
    {
        return Err(AppError::InvalidInput(
            "YNAB_TOKEN, BUDGET and ACCOUNT must be set to submit to YNAB".to_string(),
        ));
    }

    let raw_csv = if let Some(path) = &cli.csv {
        info!("Reading transactions from {}", path.display());
        std::fs::read_to_string(path)?
    } else {
        let (from, to) = resolve_window(
            cli.start_date.as_deref(),
            cli.days,
            chrono::Utc::now(),
            config.days_to_look_back,
        )?;
        info!(
            "Fetching transactions from {} to {}",
            from.format("%d/%m/%Y"),
            to.format("%d/%m/%Y")
        );
        let client = Arc::new(Trading212Client::new(&config)?);
        let fetcher = ExportFetcher::new(client, config.poll.clone());
        fetcher.fetch_csv(&from, &to).await?
    };

    if let Some(path) = &cli.save_raw_csv {
        std::fs::write(path, &raw_csv)?;
        info!("Saved raw CSV to {}", path.display());
    }

    let mut records = parse_export_csv(&raw_csv)?;
    info!("Parsed {} transactions", records.len());

    if !filter_actions.is_empty() {
        records = filter_by_action(records, &filter_actions);
        info!("{} transactions left after filtering", records.len());
    }

    let id_version = cli.id_version.unwrap_or(config.import_id_version);
    let transactions: Vec<YnabTransaction> = records
        .iter()
        .map(|record| {
            YnabTransaction::from_record(record, &config.credentials.account_id, id_version)
        })
        .collect();

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&transactions)?;
        std::fs::write(path, json)?;
        info!(
            "Wrote {} transactions to {}",
            transactions.len(),
            path.display()
        );
    }

    if cli.send {
        let ynab = YnabClient::new(&config)?;
        let outcome = ynab.create_transactions(&transactions).await?;
        info!(
            "YNAB accepted {} new transactions, {} duplicates",
            outcome.sent, outcome.duplicates
        );
    }

    Ok(())
}

fn parse_filter_labels(labels: &[String]) -> Result<Vec<Action>, AppError> {
    let mut actions = Vec::with_capacity(labels.len());
    for label in labels {
        let action = Action::from_label(label);
        if !action.is_recognized() {
            return Err(AppError::InvalidInput(format!(
                "Unknown action label '{}'; known labels: {}",
                label,
                Action::KNOWN_LABELS.join(", ")
            )));
        }
        actions.push(action);
    }
    Ok(actions)
}
