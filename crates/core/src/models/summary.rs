use serde::{Deserialize, Serialize};

use super::transaction::Transaction;

/// All transactions recorded on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayGroup {
    /// `YYYY-MM-DD`
    pub day: String,

    /// Sum of `value` over `items`
    pub total: f64,

    /// The day's transactions, most recent first
    pub items: Vec<Transaction>,
}

/// Cumulative net change per day, oldest day first.
///
/// The core produces the numbers; rendering the line is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSeries {
    /// Day strings (or a single placeholder label when there is no data)
    pub labels: Vec<String>,

    /// Running total through each day, aligned with `labels`
    pub values: Vec<f64>,
}

impl TransactionSeries {
    /// One-point series used when there are no transactions.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            labels: vec![label.into()],
            values: vec![0.0],
        }
    }

    /// The last cumulative value, or 0 for an empty series.
    pub fn latest(&self) -> f64 {
        self.values.last().copied().unwrap_or(0.0)
    }
}

/// Dashboard figures across all wallets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceSummary {
    /// Sum of all wallet balances
    pub total_balance: f64,

    pub wallet_count: usize,

    pub transaction_count: usize,

    /// Cumulative net change at the most recent day
    pub latest_net_change: f64,
}
