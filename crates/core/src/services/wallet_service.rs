use chrono::{DateTime, Utc};
use tracing::debug;

use crate::ids::IdGenerator;
use crate::models::transaction::{parse_timestamp, Transaction};
use crate::models::wallet::{Wallet, WalletInput, WalletRecord, WalletStyle, DEFAULT_WALLET_ICON};

/// Result of loading a persisted wallets array.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWallets {
    pub wallets: Vec<Wallet>,
    /// Whether any field had to be backfilled, i.e. the stored form is out
    /// of date.
    pub changed: bool,
}

/// Wallet CRUD and load-time repair.
///
/// Pure business logic over in-memory collections. Persistence is the
/// caller's job.
pub struct WalletService;

impl WalletService {
    pub fn new() -> Self {
        Self
    }

    /// Turn stored records into wallets, backfilling what older versions
    /// didn't save.
    ///
    /// - no style → palette entry at the wallet's position (`index mod palette size`)
    /// - no icon → generic wallet icon
    /// - no (or unreadable) `createdAt` → `now`
    pub fn normalize(&self, records: Vec<WalletRecord>, now: DateTime<Utc>) -> NormalizedWallets {
        let mut changed = false;
        let wallets = records
            .into_iter()
            .enumerate()
            .map(|(idx, record)| {
                let created_at = match record.created_at.as_deref().and_then(parse_timestamp) {
                    Some(created_at) => created_at,
                    None => {
                        debug!(wallet_id = %record.id, "backfilled wallet creation time");
                        changed = true;
                        now
                    }
                };
                let style_id = non_blank(record.style_id).unwrap_or_else(|| {
                    changed = true;
                    WalletStyle::for_position(idx).id.to_string()
                });
                let icon = non_blank(record.icon).unwrap_or_else(|| {
                    changed = true;
                    DEFAULT_WALLET_ICON.to_string()
                });
                Wallet {
                    id: record.id,
                    name: record.name,
                    initial: record.initial,
                    created_at,
                    style_id,
                    icon,
                }
            })
            .collect();

        NormalizedWallets { wallets, changed }
    }

    /// Update the wallet named by `input.id`, or create a new one at the front.
    /// Returns the id of the affected wallet.
    ///
    /// Updates keep the wallet's id, position and creation time.
    pub fn upsert(
        &self,
        wallets: &mut Vec<Wallet>,
        input: WalletInput,
        ids: &dyn IdGenerator,
        now: DateTime<Utc>,
    ) -> String {
        let style_id = non_blank(input.style_id)
            .unwrap_or_else(|| WalletStyle::default_style().id.to_string());
        let icon = non_blank(input.icon).unwrap_or_else(|| DEFAULT_WALLET_ICON.to_string());

        if let Some(id) = input.id.as_deref() {
            if let Some(existing) = wallets.iter_mut().find(|w| w.id == id) {
                existing.name = input.name;
                existing.initial = input.initial;
                existing.style_id = style_id;
                existing.icon = icon;
                return existing.id.clone();
            }
        }

        let wallet = Wallet {
            id: ids.next_id(),
            name: input.name,
            initial: input.initial,
            created_at: now,
            style_id,
            icon,
        };
        let id = wallet.id.clone();
        wallets.insert(0, wallet);
        id
    }

    /// Remove a wallet and every transaction booked on it.
    /// Returns `false` (and touches nothing) if the wallet doesn't exist.
    pub fn delete(
        &self,
        wallets: &mut Vec<Wallet>,
        transactions: &mut Vec<Transaction>,
        wallet_id: &str,
    ) -> bool {
        let Some(idx) = wallets.iter().position(|w| w.id == wallet_id) else {
            return false;
        };
        wallets.remove(idx);
        let before = transactions.len();
        transactions.retain(|tx| tx.wallet_id != wallet_id);
        debug!(
            wallet_id,
            removed_transactions = before - transactions.len(),
            "deleted wallet"
        );
        true
    }

    /// Display name of a wallet, or `placeholder` if it doesn't exist.
    pub fn label<'a>(
        &self,
        wallets: &'a [Wallet],
        wallet_id: &str,
        placeholder: &'a str,
    ) -> &'a str {
        wallets
            .iter()
            .find(|w| w.id == wallet_id)
            .map(|w| w.name.as_str())
            .unwrap_or(placeholder)
    }
}

impl Default for WalletService {
    fn default() -> Self {
        Self::new()
    }
}

/// `None` for absent or whitespace-only values.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
