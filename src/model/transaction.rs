/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 11/2/26
******************************************************************************/

//! Raw Trading 212 export records
//!
//! One [`RawTransactionRecord`] corresponds to one row of the export CSV.
//! Every column is optional except `Total`, which is decoded to milliunits
//! up front (defaulting to 0 when absent or unparseable).

use crate::error::AppError;
use crate::model::serialization::option_string_empty_as_none;
use crate::utils::money::parse_money;
use serde::Deserialize;
use std::fmt;

/// Transaction kinds emitted by the Trading 212 export.
///
/// The recognized set is closed; anything else lands in the explicit
/// [`Action::Unrecognized`] passthrough arm so that new export labels flow
/// through the pipeline with the base transaction template instead of
/// failing the import.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Cash paid into the account
    Deposit,
    /// Cash taken out of the account
    Withdrawal,
    /// Stock purchase
    MarketBuy,
    /// Stock sale
    MarketSell,
    /// Dividend payout
    Dividend,
    /// Interest earned on uninvested cash
    InterestOnCash,
    /// Interest earned from share lending
    LendingInterest,
    /// Conversion between currencies
    CurrencyConversion,
    /// Fee for issuing a new card
    NewCardCost,
    /// Promotional cashback
    Cashback,
    /// Card purchase
    CardDebit,
    /// Card refund or payout
    CardCredit,
    /// Cashback earned on card spending
    SpendingCashback,
    /// Any label outside the recognized set, kept verbatim
    Unrecognized(String),
}

impl Action {
    /// Wire labels of the recognized actions, as they appear in the export
    pub const KNOWN_LABELS: [&'static str; 13] = [
        "Deposit",
        "Withdrawal",
        "Market buy",
        "Market sell",
        "Dividend (Dividend)",
        "Interest on cash",
        "Lending interest",
        "Currency conversion",
        "New card cost",
        "Cashback",
        "Card debit",
        "Card credit",
        "Spending cashback",
    ];

    /// Maps an export label onto an action, preserving unknown labels
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Deposit" => Action::Deposit,
            "Withdrawal" => Action::Withdrawal,
            "Market buy" => Action::MarketBuy,
            "Market sell" => Action::MarketSell,
            "Dividend (Dividend)" => Action::Dividend,
            "Interest on cash" => Action::InterestOnCash,
            "Lending interest" => Action::LendingInterest,
            "Currency conversion" => Action::CurrencyConversion,
            "New card cost" => Action::NewCardCost,
            "Cashback" => Action::Cashback,
            "Card debit" => Action::CardDebit,
            "Card credit" => Action::CardCredit,
            "Spending cashback" => Action::SpendingCashback,
            other => Action::Unrecognized(other.to_string()),
        }
    }

    /// The export label for this action
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Action::Deposit => "Deposit",
            Action::Withdrawal => "Withdrawal",
            Action::MarketBuy => "Market buy",
            Action::MarketSell => "Market sell",
            Action::Dividend => "Dividend (Dividend)",
            Action::InterestOnCash => "Interest on cash",
            Action::LendingInterest => "Lending interest",
            Action::CurrencyConversion => "Currency conversion",
            Action::NewCardCost => "New card cost",
            Action::Cashback => "Cashback",
            Action::CardDebit => "Card debit",
            Action::CardCredit => "Card credit",
            Action::SpendingCashback => "Spending cashback",
            Action::Unrecognized(label) => label,
        }
    }

    /// Whether this action belongs to the recognized set
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Action::Unrecognized(_))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One parsed row of the Trading 212 export
#[derive(Debug, Clone, PartialEq)]
pub struct RawTransactionRecord {
    /// Transaction category
    pub action: Action,
    /// Timestamp string, `YYYY-MM-DD HH:MM:SS` with optional fractional seconds
    pub timestamp: Option<String>,
    /// Instrument ISIN
    pub isin: Option<String>,
    /// Instrument ticker
    pub ticker: Option<String>,
    /// Instrument display name
    pub name: Option<String>,
    /// Number of shares involved
    pub share_count: Option<String>,
    /// Price per share
    pub price_per_share: Option<String>,
    /// Currency of the price per share
    pub price_per_share_currency: Option<String>,
    /// Exchange rate applied
    pub exchange_rate: Option<String>,
    /// Realized result
    pub result: Option<String>,
    /// Currency of the realized result
    pub result_currency: Option<String>,
    /// Total amount in milliunits; 0 when absent or unparseable
    pub total: i64,
    /// Currency of the total amount
    pub total_currency: Option<String>,
    /// Withholding tax amount
    pub withholding_tax: Option<String>,
    /// Currency of the withholding tax
    pub withholding_tax_currency: Option<String>,
    /// Free-text notes
    pub notes: Option<String>,
    /// Source-assigned transaction ID
    pub id: Option<String>,
    /// Currency conversion source amount
    pub conversion_from_amount: Option<String>,
    /// Currency conversion source currency
    pub conversion_from_currency: Option<String>,
    /// Currency conversion target amount
    pub conversion_to_amount: Option<String>,
    /// Currency conversion target currency
    pub conversion_to_currency: Option<String>,
    /// Currency conversion fee
    pub conversion_fee: Option<String>,
    /// Currency conversion fee currency
    pub conversion_fee_currency: Option<String>,
    /// Merchant name for card transactions
    pub merchant_name: Option<String>,
    /// Merchant category for card transactions
    pub merchant_category: Option<String>,
}

/// The export CSV column schema. Columns vary between exports depending on
/// the requested inclusion set, so every field tolerates absence.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    #[serde(rename = "Action", deserialize_with = "option_string_empty_as_none")]
    action: Option<String>,
    #[serde(rename = "Time", deserialize_with = "option_string_empty_as_none")]
    time: Option<String>,
    #[serde(rename = "ISIN", deserialize_with = "option_string_empty_as_none")]
    isin: Option<String>,
    #[serde(rename = "Ticker", deserialize_with = "option_string_empty_as_none")]
    ticker: Option<String>,
    #[serde(rename = "Name", deserialize_with = "option_string_empty_as_none")]
    name: Option<String>,
    #[serde(rename = "No. of shares", deserialize_with = "option_string_empty_as_none")]
    share_count: Option<String>,
    #[serde(rename = "Price / share", deserialize_with = "option_string_empty_as_none")]
    price_per_share: Option<String>,
    #[serde(
        rename = "Currency (Price / share)",
        deserialize_with = "option_string_empty_as_none"
    )]
    price_per_share_currency: Option<String>,
    #[serde(rename = "Exchange rate", deserialize_with = "option_string_empty_as_none")]
    exchange_rate: Option<String>,
    #[serde(rename = "Result", deserialize_with = "option_string_empty_as_none")]
    result: Option<String>,
    #[serde(
        rename = "Currency (Result)",
        deserialize_with = "option_string_empty_as_none"
    )]
    result_currency: Option<String>,
    #[serde(rename = "Total", deserialize_with = "option_string_empty_as_none")]
    total: Option<String>,
    #[serde(
        rename = "Currency (Total)",
        deserialize_with = "option_string_empty_as_none"
    )]
    total_currency: Option<String>,
    #[serde(rename = "Withholding tax", deserialize_with = "option_string_empty_as_none")]
    withholding_tax: Option<String>,
    #[serde(
        rename = "Currency (Withholding tax)",
        deserialize_with = "option_string_empty_as_none"
    )]
    withholding_tax_currency: Option<String>,
    #[serde(rename = "Notes", deserialize_with = "option_string_empty_as_none")]
    notes: Option<String>,
    #[serde(rename = "ID", deserialize_with = "option_string_empty_as_none")]
    id: Option<String>,
    #[serde(
        rename = "Currency conversion from amount",
        deserialize_with = "option_string_empty_as_none"
    )]
    conversion_from_amount: Option<String>,
    #[serde(
        rename = "Currency (Currency conversion from amount)",
        deserialize_with = "option_string_empty_as_none"
    )]
    conversion_from_currency: Option<String>,
    #[serde(
        rename = "Currency conversion to amount",
        deserialize_with = "option_string_empty_as_none"
    )]
    conversion_to_amount: Option<String>,
    #[serde(
        rename = "Currency (Currency conversion to amount)",
        deserialize_with = "option_string_empty_as_none"
    )]
    conversion_to_currency: Option<String>,
    #[serde(
        rename = "Currency conversion fee",
        deserialize_with = "option_string_empty_as_none"
    )]
    conversion_fee: Option<String>,
    #[serde(
        rename = "Currency (Currency conversion fee)",
        deserialize_with = "option_string_empty_as_none"
    )]
    conversion_fee_currency: Option<String>,
    #[serde(rename = "Merchant name", deserialize_with = "option_string_empty_as_none")]
    merchant_name: Option<String>,
    #[serde(rename = "Merchant category", deserialize_with = "option_string_empty_as_none")]
    merchant_category: Option<String>,
}

impl From<CsvRow> for RawTransactionRecord {
    fn from(row: CsvRow) -> Self {
        let total = parse_money(row.total.as_deref().unwrap_or_default()).value_logged("Total");
        RawTransactionRecord {
            action: Action::from_label(row.action.as_deref().unwrap_or_default()),
            timestamp: row.time,
            isin: row.isin,
            ticker: row.ticker,
            name: row.name,
            share_count: row.share_count,
            price_per_share: row.price_per_share,
            price_per_share_currency: row.price_per_share_currency,
            exchange_rate: row.exchange_rate,
            result: row.result,
            result_currency: row.result_currency,
            total,
            total_currency: row.total_currency,
            withholding_tax: row.withholding_tax,
            withholding_tax_currency: row.withholding_tax_currency,
            notes: row.notes,
            id: row.id,
            conversion_from_amount: row.conversion_from_amount,
            conversion_from_currency: row.conversion_from_currency,
            conversion_to_amount: row.conversion_to_amount,
            conversion_to_currency: row.conversion_to_currency,
            conversion_fee: row.conversion_fee,
            conversion_fee_currency: row.conversion_fee_currency,
            merchant_name: row.merchant_name,
            merchant_category: row.merchant_category,
        }
    }
}

/// Parses the raw export CSV content into records
pub fn parse_export_csv(content: &str) -> Result<Vec<RawTransactionRecord>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        records.push(row?.into());
    }
    Ok(records)
}

/// Selects the records whose action is in `wanted`, preserving order
#[must_use]
pub fn filter_by_action(
    records: Vec<RawTransactionRecord>,
    wanted: &[Action],
) -> Vec<RawTransactionRecord> {
    records
        .into_iter()
        .filter(|record| wanted.contains(&record.action))
        .collect()
}
