//! Reduction of grouped status rows into the listing summary.

use std::collections::HashMap;

/// Label emitted in every summary.
///
/// Known limitation: the aggregate ignores per-record currency codes and
/// reports this constant instead of deriving the label from data.
pub const SUMMARY_CURRENCY: &str = "USD";

/// One grouped aggregate row from the store: `(status, count, sum(amount))`
/// over the whole filtered range. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusRow {
    pub status: String,
    pub txn_count: i64,
    pub total_amount_minor: i64,
}

/// Status-based totals over the entire filtered range, independent of the
/// page window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub total_transactions: i64,
    pub total_amount_minor: i64,
    pub currency: String,
    pub by_status: HashMap<String, i64>,
}

impl Summary {
    /// Reduces the store's grouped rows to totals and a status→count map.
    ///
    /// Statuses are lowercased and case-variant duplicates merge additively,
    /// so `sum(by_status.values())` always equals `total_transactions`.
    pub fn from_rows(rows: &[StatusRow]) -> Self {
        let mut total_transactions = 0;
        let mut total_amount_minor = 0;
        let mut by_status: HashMap<String, i64> = HashMap::new();

        for row in rows {
            total_transactions += row.txn_count;
            total_amount_minor += row.total_amount_minor;
            *by_status.entry(row.status.to_lowercase()).or_insert(0) += row.txn_count;
        }

        Self {
            total_transactions,
            total_amount_minor,
            currency: SUMMARY_CURRENCY.to_string(),
            by_status,
        }
    }
}
