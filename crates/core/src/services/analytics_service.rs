use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use crate::models::summary::{DayGroup, FinanceSummary, TransactionSeries};
use crate::models::transaction::Transaction;
use crate::models::wallet::Wallet;

/// Read-only views derived from the wallet and transaction collections.
///
/// Rebuilt after every mutation, so they always match the latest state.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedViews {
    pub wallet_balances: HashMap<String, f64>,
    pub sorted_transactions: Vec<Transaction>,
    pub transactions_by_day: Vec<DayGroup>,
    pub transaction_series: TransactionSeries,
}

/// Computes balances, day groupings and the cumulative series.
///
/// Pure functions of their inputs. No I/O, no state.
pub struct AnalyticsService;

impl AnalyticsService {
    pub fn new() -> Self {
        Self
    }

    /// Build every derived view at once.
    pub fn derive(
        &self,
        wallets: &[Wallet],
        transactions: &[Transaction],
        empty_series_label: &str,
    ) -> DerivedViews {
        let sorted_transactions = self.sorted_transactions(transactions);
        let transactions_by_day = self.group_by_day(&sorted_transactions);
        DerivedViews {
            wallet_balances: self.wallet_balances(wallets, transactions),
            transaction_series: self.transaction_series(transactions, empty_series_label),
            sorted_transactions,
            transactions_by_day,
        }
    }

    /// `initial + Σ value` for every wallet. Transactions on unknown wallets
    /// are ignored.
    pub fn wallet_balances(
        &self,
        wallets: &[Wallet],
        transactions: &[Transaction],
    ) -> HashMap<String, f64> {
        let mut sums: HashMap<&str, f64> = HashMap::new();
        for tx in transactions {
            *sums.entry(tx.wallet_id.as_str()).or_insert(0.0) += tx.value;
        }

        wallets
            .iter()
            .map(|w| {
                let moved = sums.get(w.id.as_str()).copied().unwrap_or(0.0);
                (w.id.clone(), w.initial + moved)
            })
            .collect()
    }

    /// Most recent first. Equal timestamps keep their relative order;
    /// unparseable timestamps go last.
    pub fn sorted_transactions(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let mut sorted = transactions.to_vec();
        sorted.sort_by_cached_key(|tx| {
            let instant = tx.instant();
            (instant.is_none(), Reverse(instant))
        });
        sorted
    }

    /// Group already-sorted transactions by day, newest day first.
    ///
    /// Items keep the order they have in `sorted`.
    pub fn group_by_day(&self, sorted: &[Transaction]) -> Vec<DayGroup> {
        let mut groups: Vec<DayGroup> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for tx in sorted {
            let day = tx.day();
            let slot = *index.entry(day).or_insert_with(|| {
                groups.push(DayGroup {
                    day: day.to_string(),
                    total: 0.0,
                    items: Vec::new(),
                });
                groups.len() - 1
            });
            let group = &mut groups[slot];
            group.total += tx.value;
            group.items.push(tx.clone());
        }

        groups.sort_by(|a, b| b.day.cmp(&a.day));
        groups
    }

    /// Running total of daily net change, oldest day first.
    ///
    /// With no transactions, returns a single `(placeholder, 0)` point.
    pub fn transaction_series(
        &self,
        transactions: &[Transaction],
        placeholder: &str,
    ) -> TransactionSeries {
        let mut daily: BTreeMap<&str, f64> = BTreeMap::new();
        for tx in transactions {
            *daily.entry(tx.day()).or_insert(0.0) += tx.value;
        }

        if daily.is_empty() {
            return TransactionSeries::placeholder(placeholder);
        }

        let mut running = 0.0;
        let mut labels = Vec::with_capacity(daily.len());
        let mut values = Vec::with_capacity(daily.len());
        for (day, delta) in daily {
            running += delta;
            labels.push(day.to_string());
            values.push(running);
        }
        TransactionSeries { labels, values }
    }

    /// Dashboard totals.
    pub fn summary(
        &self,
        views: &DerivedViews,
        wallet_count: usize,
        transaction_count: usize,
    ) -> FinanceSummary {
        FinanceSummary {
            total_balance: views.wallet_balances.values().sum(),
            wallet_count,
            transaction_count,
            latest_net_change: views.transaction_series.latest(),
        }
    }
}

impl Default for AnalyticsService {
    fn default() -> Self {
        Self::new()
    }
}
