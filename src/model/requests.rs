/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 11/2/26
******************************************************************************/

//! Request payloads for the Trading 212 and YNAB APIs

use crate::model::ynab::YnabTransaction;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Inclusion set for an export request.
///
/// This pipeline always requests the full set; narrowing happens later in
/// the category filter, not at the source.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataIncluded {
    /// Include dividend payouts
    pub include_dividends: bool,
    /// Include interest entries
    pub include_interest: bool,
    /// Include market orders
    pub include_orders: bool,
    /// Include cash and card transactions
    pub include_transactions: bool,
}

impl Default for DataIncluded {
    fn default() -> Self {
        Self {
            include_dividends: true,
            include_interest: true,
            include_orders: true,
            include_transactions: true,
        }
    }
}

/// Payload for creating a new transaction export
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Which record kinds the export should contain
    pub data_included: DataIncluded,
    /// Window start, RFC 3339
    pub time_from: String,
    /// Window end, RFC 3339
    pub time_to: String,
}

impl ExportRequest {
    /// Builds an export request for the given window with the full
    /// inclusion set
    #[must_use]
    pub fn new(from: &DateTime<Utc>, to: &DateTime<Utc>) -> Self {
        Self {
            data_included: DataIncluded::default(),
            time_from: from.to_rfc3339(),
            time_to: to.to_rfc3339(),
        }
    }
}

/// Payload for the YNAB create-transactions endpoint
#[derive(Debug, Serialize)]
pub struct CreateTransactionsRequest<'a> {
    /// Batch of normalized transactions
    pub transactions: &'a [YnabTransaction],
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_request_wire_shape() {
        let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).unwrap();
        let request = ExportRequest::new(&from, &to);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["timeFrom"], "2024-01-01T00:00:00+00:00");
        assert_eq!(json["timeTo"], "2024-06-01T12:30:00+00:00");
        assert_eq!(json["dataIncluded"]["includeDividends"], true);
        assert_eq!(json["dataIncluded"]["includeTransactions"], true);
    }
}
