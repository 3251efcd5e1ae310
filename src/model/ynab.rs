/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 11/2/26
******************************************************************************/

//! Normalization of export records into YNAB transactions
//!
//! [`YnabTransaction::from_record`] is total: every recognized action gets
//! its own payee/memo treatment, and unrecognized actions pass through with
//! the base template (account, date, amount, cleared marker, import id)
//! so an unexpected export label never aborts an import.

use crate::model::transaction::{Action, RawTransactionRecord};
use crate::utils::import_id::make_import_id;
use crate::utils::money::Parsed;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A transaction in the shape accepted by the YNAB transactions endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YnabTransaction {
    /// Target YNAB account
    pub account_id: String,
    /// ISO date, day granularity
    pub date: String,
    /// Signed amount in milliunits
    pub amount: i64,
    /// Clearance marker; always `"cleared"` in this pipeline
    pub cleared: String,
    /// Deterministic identity used by YNAB for deduplication
    pub import_id: String,
    /// Payee display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_name: Option<String>,
    /// Memo text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    /// Flag color marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag_color: Option<String>,
    /// Whether the transaction arrives pre-approved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

impl YnabTransaction {
    /// Normalizes one export record into a YNAB transaction.
    ///
    /// The import identity is derived from the record's timestamp and
    /// source-assigned ID under `id_version`, so re-running an import
    /// regenerates identical identities and YNAB drops the duplicates.
    #[must_use]
    pub fn from_record(record: &RawTransactionRecord, account_id: &str, id_version: u32) -> Self {
        let timestamp = record.timestamp.as_deref().unwrap_or_default();
        let date = extract_date(timestamp).value_logged("timestamp");
        let import_id = make_import_id(
            timestamp,
            record.id.as_deref().unwrap_or_default(),
            id_version,
        );

        let mut tx = YnabTransaction {
            account_id: account_id.to_string(),
            date,
            amount: record.total,
            cleared: "cleared".to_string(),
            import_id,
            payee_name: None,
            memo: None,
            flag_color: None,
            approved: None,
        };

        match &record.action {
            Action::Deposit | Action::Withdrawal => {
                tx.payee_name = Some(record.action.label().to_string());
                tx.memo = record.notes.clone();
            }
            Action::InterestOnCash | Action::LendingInterest => {
                tx.payee_name = Some("Interest".to_string());
                if record.action == Action::LendingInterest {
                    tx.memo = Some("Lending interest".to_string());
                }
                tx.flag_color = Some("purple".to_string());
                // Lending interest is left unapproved for manual review
                tx.approved = Some(record.action == Action::InterestOnCash);
            }
            Action::Cashback => {
                tx.payee_name = Some("Cashback".to_string());
                tx.memo = record
                    .notes
                    .clone()
                    .or_else(|| Some("Trading 212 Cashback".to_string()));
                tx.flag_color = Some("green".to_string());
                tx.approved = Some(true);
            }
            Action::Dividend => {
                tx.payee_name = Some(format!(
                    "Stock: {}",
                    record.name.as_deref().unwrap_or_default()
                ));
                tx.memo = Some(format!(
                    "Dividend - {}x {} [{}]",
                    record.share_count.as_deref().unwrap_or_default(),
                    record.ticker.as_deref().unwrap_or_default(),
                    record.isin.as_deref().unwrap_or_default(),
                ));
            }
            Action::CardDebit => {
                tx.payee_name = Some(merchant_display_name(record.merchant_name.as_deref()));

                let mut parts = Vec::new();
                if let Some(category) = record.merchant_category.as_deref() {
                    let formatted = format_category_name(category);
                    if !formatted.is_empty() {
                        parts.push(format!("Category: {formatted}"));
                    }
                }
                if let Some(notes) = &record.notes {
                    parts.push(notes.clone());
                }
                if !parts.is_empty() {
                    tx.memo = Some(parts.join(" | "));
                }
            }
            Action::CardCredit => {
                tx.payee_name = Some(merchant_display_name(record.merchant_name.as_deref()));

                // Notes usually carry the kind of credit, e.g. "REFUND" or "PAYOUT"
                let kind = sentence_case(record.notes.as_deref().unwrap_or("Refund"));
                let mut parts = vec![kind];
                if let Some(category) = record.merchant_category.as_deref() {
                    let formatted = format_category_name(category);
                    if !formatted.is_empty() {
                        parts.push(formatted);
                    }
                }
                tx.memo = Some(parts.join(" | "));
            }
            Action::SpendingCashback => {
                tx.payee_name = Some("Cashback Rewards".to_string());
                tx.memo = Some("Spending cashback".to_string());
                tx.flag_color = Some("green".to_string());
                tx.approved = Some(true);
            }
            Action::MarketBuy | Action::MarketSell => {
                let verb = if record.action == Action::MarketBuy {
                    "Purchase"
                } else {
                    "Sale"
                };
                tx.payee_name = Some(format!(
                    "Stock: {}",
                    record
                        .name
                        .as_deref()
                        .or(record.ticker.as_deref())
                        .unwrap_or_default()
                ));

                let mut parts = Vec::new();
                if let Some(ticker) = &record.ticker {
                    parts.push(ticker.clone());
                }
                if let Some(count) = &record.share_count {
                    parts.push(format!("{count} shares"));
                }
                if let (Some(price), Some(currency)) = (
                    record.price_per_share.as_deref(),
                    record.price_per_share_currency.as_deref(),
                ) {
                    parts.push(format!("{price} {currency}/share"));
                }
                tx.memo = Some(format!("{verb}: {}", parts.join(", ")));
            }
            // Intentional passthrough: base template only
            Action::CurrencyConversion | Action::NewCardCost | Action::Unrecognized(_) => {}
        }

        tx
    }
}

/// Extracts the ISO date from an export timestamp.
///
/// Tries the timestamp format with fractional seconds first, then without.
/// When both fail, degrades to the substring before the first whitespace
/// rather than failing the record.
fn extract_date(timestamp: &str) -> Parsed<String> {
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(timestamp, format) {
            return Parsed::ok(parsed.format("%Y-%m-%d").to_string());
        }
    }
    let date_part = timestamp
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();
    Parsed::degraded(
        date_part,
        format!("could not parse timestamp '{timestamp}', extracting date part only"),
    )
}

/// Word-capitalizes a merchant name, falling back to "Unknown Merchant"
fn merchant_display_name(merchant_name: Option<&str>) -> String {
    capitalize_words(merchant_name.unwrap_or("Unknown Merchant"))
}

/// Capitalizes each whitespace-separated word: `"tesco stores"` → `"Tesco Stores"`
fn capitalize_words(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

/// Formats an upper-snake-case merchant category as title case:
/// `"SUPERMARKETS_AND_GROCERY_STORES"` → `"Supermarkets And Grocery Stores"`
fn format_category_name(category: &str) -> String {
    capitalize_words(&category.replace('_', " "))
}

/// Uppercases the first character and lowercases the rest:
/// `"REFUND"` → `"Refund"`
fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::IMPORT_ID_VERSION;
    use crate::model::transaction::parse_export_csv;

    fn record(action: &str) -> RawTransactionRecord {
        let csv = format!(
            "Action,Time,Total,ID\n{action},2024-01-05 10:00:00,12.34,tx-1\n"
        );
        parse_export_csv(&csv).unwrap().remove(0)
    }

    fn normalize(record: &RawTransactionRecord) -> YnabTransaction {
        YnabTransaction::from_record(record, "account-1", IMPORT_ID_VERSION)
    }

    #[test]
    fn test_normalizer_is_total_over_all_actions() {
        for label in Action::KNOWN_LABELS {
            let tx = normalize(&record(label));
            assert_eq!(tx.account_id, "account-1");
            assert_eq!(tx.date, "2024-01-05");
            assert_eq!(tx.amount, 12_340);
            assert_eq!(tx.cleared, "cleared");
            assert_eq!(tx.import_id.len(), 36);
        }
    }

    #[test]
    fn test_unrecognized_action_is_base_template_only() {
        let tx = normalize(&record("Stock split"));
        assert_eq!(tx.payee_name, None);
        assert_eq!(tx.memo, None);
        assert_eq!(tx.flag_color, None);
        assert_eq!(tx.approved, None);
        assert_eq!(tx.date, "2024-01-05");
    }

    #[test]
    fn test_date_with_fractional_seconds() {
        assert_eq!(
            extract_date("2024-01-05 10:00:00.123").value,
            "2024-01-05"
        );
    }

    #[test]
    fn test_date_without_fractional_seconds() {
        let parsed = extract_date("2024-01-05 10:00:00");
        assert_eq!(parsed.value, "2024-01-05");
        assert!(!parsed.is_degraded());
    }

    #[test]
    fn test_date_fallback_takes_pre_whitespace_substring() {
        let parsed = extract_date("garbage 2024-01-05");
        assert_eq!(parsed.value, "garbage");
        assert!(parsed.is_degraded());
    }

    #[test]
    fn test_deposit_memo_absent_without_notes() {
        let deposit = record("Deposit");
        let tx = normalize(&deposit);
        assert_eq!(tx.payee_name.as_deref(), Some("Deposit"));
        assert_eq!(tx.memo, None);
    }

    #[test]
    fn test_interest_variants() {
        let cash = normalize(&record("Interest on cash"));
        assert_eq!(cash.payee_name.as_deref(), Some("Interest"));
        assert_eq!(cash.memo, None);
        assert_eq!(cash.flag_color.as_deref(), Some("purple"));
        assert_eq!(cash.approved, Some(true));

        let lending = normalize(&record("Lending interest"));
        assert_eq!(lending.payee_name.as_deref(), Some("Interest"));
        assert_eq!(lending.memo.as_deref(), Some("Lending interest"));
        assert_eq!(lending.flag_color.as_deref(), Some("purple"));
        assert_eq!(lending.approved, Some(false));
    }

    #[test]
    fn test_cashback_defaults_memo() {
        let tx = normalize(&record("Cashback"));
        assert_eq!(tx.payee_name.as_deref(), Some("Cashback"));
        assert_eq!(tx.memo.as_deref(), Some("Trading 212 Cashback"));
        assert_eq!(tx.flag_color.as_deref(), Some("green"));
        assert_eq!(tx.approved, Some(true));
    }

    #[test]
    fn test_dividend_memo() {
        let mut dividend = record("Dividend (Dividend)");
        dividend.name = Some("Apple Inc".to_string());
        dividend.share_count = Some("2".to_string());
        dividend.ticker = Some("AAPL".to_string());
        dividend.isin = Some("US0378331005".to_string());

        let tx = normalize(&dividend);
        assert_eq!(tx.payee_name.as_deref(), Some("Stock: Apple Inc"));
        assert_eq!(
            tx.memo.as_deref(),
            Some("Dividend - 2x AAPL [US0378331005]")
        );
    }

    #[test]
    fn test_card_debit_memo_scenario() {
        let mut debit = record("Card debit");
        debit.merchant_name = Some("tesco stores".to_string());
        debit.merchant_category = Some("SUPERMARKETS_AND_GROCERY_STORES".to_string());
        debit.notes = Some("weekly shop".to_string());

        let tx = normalize(&debit);
        assert_eq!(tx.payee_name.as_deref(), Some("Tesco Stores"));
        assert_eq!(
            tx.memo.as_deref(),
            Some("Category: Supermarkets And Grocery Stores | weekly shop")
        );
    }

    #[test]
    fn test_card_debit_unknown_merchant() {
        let tx = normalize(&record("Card debit"));
        assert_eq!(tx.payee_name.as_deref(), Some("Unknown Merchant"));
        assert_eq!(tx.memo, None);
    }

    #[test]
    fn test_card_credit_memo() {
        let mut credit = record("Card credit");
        credit.merchant_name = Some("TESCO STORES".to_string());
        credit.merchant_category = Some("SUPERMARKETS_AND_GROCERY_STORES".to_string());
        credit.notes = Some("REFUND".to_string());

        let tx = normalize(&credit);
        assert_eq!(tx.payee_name.as_deref(), Some("Tesco Stores"));
        assert_eq!(
            tx.memo.as_deref(),
            Some("Refund | Supermarkets And Grocery Stores")
        );
    }

    #[test]
    fn test_card_credit_defaults_to_refund() {
        let tx = normalize(&record("Card credit"));
        assert_eq!(tx.memo.as_deref(), Some("Refund"));
    }

    #[test]
    fn test_market_buy_memo_scenario() {
        let mut buy = record("Market buy");
        buy.ticker = Some("AAPL".to_string());
        buy.share_count = Some("2".to_string());
        buy.price_per_share = Some("150.00".to_string());
        buy.price_per_share_currency = Some("USD".to_string());

        let tx = normalize(&buy);
        assert_eq!(tx.payee_name.as_deref(), Some("Stock: AAPL"));
        assert_eq!(
            tx.memo.as_deref(),
            Some("Purchase: AAPL, 2 shares, 150.00 USD/share")
        );
    }

    #[test]
    fn test_market_sell_uses_name_over_ticker() {
        let mut sell = record("Market sell");
        sell.name = Some("Apple Inc".to_string());
        sell.ticker = Some("AAPL".to_string());

        let tx = normalize(&sell);
        assert_eq!(tx.payee_name.as_deref(), Some("Stock: Apple Inc"));
        assert_eq!(tx.memo.as_deref(), Some("Sale: AAPL"));
    }

    #[test]
    fn test_import_id_stable_across_runs() {
        let deposit = record("Deposit");
        let first = normalize(&deposit);
        let second = normalize(&deposit);
        assert_eq!(first.import_id, second.import_id);

        let bumped = YnabTransaction::from_record(&deposit, "account-1", IMPORT_ID_VERSION + 1);
        assert_ne!(first.import_id, bumped.import_id);
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let tx = normalize(&record("Currency conversion"));
        let json = serde_json::to_value(&tx).unwrap();
        assert!(json.get("payee_name").is_none());
        assert!(json.get("memo").is_none());
        assert_eq!(json["cleared"], "cleared");
    }
}
