use serde::{Deserialize, Serialize};

/// Store configuration: persistence keys and placeholder labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Backend key holding the wallets array
    pub wallets_key: String,

    /// Backend key holding the transactions array
    pub transactions_key: String,

    /// Backend key holding the categories array
    pub categories_key: String,

    /// Returned by `wallet_label` for unknown wallet ids
    pub unknown_wallet_label: String,

    /// Label of the placeholder point in an empty transaction series
    pub empty_series_label: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            wallets_key: "finance-wallets".to_string(),
            transactions_key: "finance-transactions".to_string(),
            categories_key: "finance-categories".to_string(),
            unknown_wallet_label: "Unknown wallet".to_string(),
            empty_series_label: "No data".to_string(),
        }
    }
}
