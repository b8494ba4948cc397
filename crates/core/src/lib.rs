pub mod errors;
pub mod ids;
pub mod models;
pub mod services;
pub mod storage;

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use ids::{IdGenerator, RandomIdGenerator};
use models::{
    category::{self as category_model, Category, CategoryInput, StoredCategory},
    settings::StoreSettings,
    summary::{DayGroup, FinanceSummary, TransactionSeries},
    transaction::{Transaction, TransactionInput},
    wallet::{Wallet, WalletInput, WalletRecord, WalletStyle, WALLET_STYLES},
};
use services::{
    analytics_service::{AnalyticsService, DerivedViews},
    category_service::{CategoryRemoval, CategoryService},
    transaction_service::TransactionService,
    wallet_service::WalletService,
};
use storage::{codec, PersistenceBackend};

/// Main entry point for the Finance Tracker core library.
///
/// Owns the wallet, transaction and category collections, writes each one
/// back to the persistence backend after every change, and keeps the derived
/// views (balances, day groups, cumulative series) in step with them.
///
/// No operation fails: unknown ids are no-ops, lookups degrade to defaults,
/// and persistence errors are logged and swallowed. Input validation (blank
/// names, zero amounts, unknown wallets) belongs to the caller.
#[must_use]
pub struct FinanceStore {
    wallets: Vec<Wallet>,
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
    views: DerivedViews,
    settings: StoreSettings,
    backend: Option<Box<dyn PersistenceBackend>>,
    ids: Box<dyn IdGenerator>,
    wallet_service: WalletService,
    transaction_service: TransactionService,
    category_service: CategoryService,
    analytics_service: AnalyticsService,
}

impl std::fmt::Debug for FinanceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinanceStore")
            .field("wallets", &self.wallets.len())
            .field("transactions", &self.transactions.len())
            .field("categories", &self.categories.len())
            .field("persistent", &self.backend.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

impl FinanceStore {
    /// Open a store over `backend` with random ids and default settings.
    pub fn open(backend: impl PersistenceBackend + 'static) -> Self {
        Self::with_settings(
            Some(Box::new(backend)),
            Box::new(RandomIdGenerator::new()),
            StoreSettings::default(),
        )
    }

    /// A store with no persistence: starts from the defaults and forgets
    /// everything when dropped.
    pub fn in_memory() -> Self {
        Self::with_settings(
            None,
            Box::new(RandomIdGenerator::new()),
            StoreSettings::default(),
        )
    }

    /// Load and normalize all three collections.
    ///
    /// Absent or corrupt data falls back to empty wallets/transactions and the
    /// default category set. Wallets and categories are written back when
    /// normalization had to migrate or backfill them.
    pub fn with_settings(
        backend: Option<Box<dyn PersistenceBackend>>,
        ids: Box<dyn IdGenerator>,
        settings: StoreSettings,
    ) -> Self {
        let wallet_service = WalletService::new();
        let transaction_service = TransactionService::new();
        let category_service = CategoryService::new();
        let analytics_service = AnalyticsService::new();

        let source = backend.as_deref();
        let stored_wallets: Vec<WalletRecord> =
            codec::load_or(source, &settings.wallets_key, Vec::new);
        let wallets = {
            let normalized = wallet_service.normalize(stored_wallets, Utc::now());
            if normalized.changed {
                codec::write_back(source, &settings.wallets_key, &normalized.wallets);
            }
            normalized.wallets
        };
        let transactions: Vec<Transaction> =
            codec::load_or(source, &settings.transactions_key, Vec::new);
        let stored_categories =
            codec::load::<Vec<StoredCategory>>(source, &settings.categories_key);
        let categories = match stored_categories {
            Some(stored) => {
                let normalized = category_service.normalize(stored);
                if normalized.changed {
                    codec::write_back(source, &settings.categories_key, &normalized.categories);
                }
                normalized.categories
            }
            None => category_model::default_categories(),
        };

        debug!(
            wallets = wallets.len(),
            transactions = transactions.len(),
            categories = categories.len(),
            "finance store loaded"
        );

        let views = analytics_service.derive(&wallets, &transactions, &settings.empty_series_label);

        Self {
            wallets,
            transactions,
            categories,
            views,
            settings,
            backend,
            ids,
            wallet_service,
            transaction_service,
            category_service,
            analytics_service,
        }
    }

    // ── Collections ─────────────────────────────────────────────────

    /// Wallets, most recently created first.
    #[must_use]
    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    /// Transactions in storage order (most recently added first).
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    // ── Wallets ─────────────────────────────────────────────────────

    /// Create a wallet, or update the one named by `input.id`.
    /// Returns the wallet's id.
    pub fn upsert_wallet(&mut self, input: WalletInput) -> String {
        let id = self
            .wallet_service
            .upsert(&mut self.wallets, input, &*self.ids, Utc::now());
        debug!(wallet_id = %id, "upserted wallet");
        self.persist_wallets();
        self.refresh_views();
        id
    }

    /// Delete a wallet together with all of its transactions.
    /// Returns `false` if no such wallet exists.
    pub fn delete_wallet(&mut self, wallet_id: &str) -> bool {
        if !self
            .wallet_service
            .delete(&mut self.wallets, &mut self.transactions, wallet_id)
        {
            return false;
        }
        self.persist_wallets();
        self.persist_transactions();
        self.refresh_views();
        true
    }

    #[must_use]
    pub fn get_wallet(&self, wallet_id: &str) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == wallet_id)
    }

    /// Wallet name, or the configured placeholder for unknown ids.
    #[must_use]
    pub fn wallet_label(&self, wallet_id: &str) -> &str {
        self.wallet_service
            .label(&self.wallets, wallet_id, &self.settings.unknown_wallet_label)
    }

    /// Id of the first (most recently created) wallet.
    #[must_use]
    pub fn default_wallet_id(&self) -> Option<&str> {
        self.wallets.first().map(|w| w.id.as_str())
    }

    /// The fixed style palette.
    #[must_use]
    pub fn wallet_styles() -> &'static [WalletStyle] {
        &WALLET_STYLES
    }

    /// Palette entry for `style_id`, or the first entry if it's unknown.
    #[must_use]
    pub fn wallet_style(style_id: &str) -> &'static WalletStyle {
        WalletStyle::find(style_id)
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a transaction, or update the one named by `input.id`.
    /// Returns the transaction's id.
    pub fn upsert_transaction(&mut self, input: TransactionInput) -> String {
        let id = self
            .transaction_service
            .upsert(&mut self.transactions, input, &*self.ids);
        debug!(transaction_id = %id, "upserted transaction");
        self.persist_transactions();
        self.refresh_views();
        id
    }

    /// Returns `false` if no such transaction exists.
    pub fn delete_transaction(&mut self, transaction_id: &str) -> bool {
        if !self
            .transaction_service
            .delete(&mut self.transactions, transaction_id)
        {
            return false;
        }
        debug!(transaction_id, "deleted transaction");
        self.persist_transactions();
        self.refresh_views();
        true
    }

    #[must_use]
    pub fn get_transaction(&self, transaction_id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == transaction_id)
    }

    /// Transactions booked on `wallet_id`, most recent first.
    #[must_use]
    pub fn transactions_for_wallet(&self, wallet_id: &str) -> Vec<&Transaction> {
        self.views
            .sorted_transactions
            .iter()
            .filter(|tx| tx.wallet_id == wallet_id)
            .collect()
    }

    /// Transactions labelled `category_name`, most recent first.
    #[must_use]
    pub fn transactions_for_category(&self, category_name: &str) -> Vec<&Transaction> {
        self.views
            .sorted_transactions
            .iter()
            .filter(|tx| tx.category == category_name)
            .collect()
    }

    // ── Categories ──────────────────────────────────────────────────

    /// Create a category, or update the one named by `input.id`.
    /// Returns the category's id.
    ///
    /// Renaming does not relabel existing transactions: they reference
    /// categories by name and keep the old one.
    pub fn upsert_category(&mut self, input: CategoryInput) -> String {
        let id = self
            .category_service
            .upsert(&mut self.categories, input, &*self.ids);
        debug!(category_id = %id, "upserted category");
        self.persist_categories();
        id
    }

    /// Delete a category and relabel its transactions `"Uncategorized"`.
    ///
    /// Deleting the fallback category itself, or an unknown id, does nothing.
    /// Returns whether a category was removed.
    pub fn delete_category(&mut self, category_id: &str) -> bool {
        if self.category_service.ensure_fallback(&mut self.categories) {
            self.persist_categories();
        }

        match self
            .category_service
            .delete(&mut self.categories, &mut self.transactions, category_id)
        {
            CategoryRemoval::Missing => false,
            CategoryRemoval::Protected => {
                debug!(category_id, "refused to delete fallback category");
                false
            }
            CategoryRemoval::Removed { name, reassigned } => {
                debug!(category_id, %name, reassigned, "deleted category");
                self.persist_categories();
                if reassigned > 0 {
                    self.persist_transactions();
                    self.refresh_views();
                }
                true
            }
        }
    }

    #[must_use]
    pub fn get_category(&self, category_id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == category_id)
    }

    /// The `"Uncategorized"` category.
    #[must_use]
    pub fn fallback_category(&self) -> Option<&Category> {
        self.categories.iter().find(|c| c.is_fallback())
    }

    /// Icon of the category called `name`, or the generic icon.
    #[must_use]
    pub fn category_icon(&self, name: &str) -> &str {
        self.category_service.icon_for(&self.categories, name)
    }

    /// Name of the first category, the usual preselection for new transactions.
    #[must_use]
    pub fn default_category_name(&self) -> Option<&str> {
        self.categories.first().map(|c| c.name.as_str())
    }

    /// The built-in category set used for a fresh store.
    #[must_use]
    pub fn default_categories() -> Vec<Category> {
        category_model::default_categories()
    }

    // ── Derived views ───────────────────────────────────────────────

    /// Current balance of every wallet, keyed by wallet id.
    #[must_use]
    pub fn wallet_balances(&self) -> &HashMap<String, f64> {
        &self.views.wallet_balances
    }

    /// Balance of one wallet; 0 for unknown ids.
    #[must_use]
    pub fn current_balance(&self, wallet_id: &str) -> f64 {
        self.views
            .wallet_balances
            .get(wallet_id)
            .copied()
            .unwrap_or(0.0)
    }

    /// All transactions, most recent first.
    #[must_use]
    pub fn sorted_transactions(&self) -> &[Transaction] {
        &self.views.sorted_transactions
    }

    /// Transactions grouped per day, newest day first.
    #[must_use]
    pub fn transactions_by_day(&self) -> &[DayGroup] {
        &self.views.transactions_by_day
    }

    /// Cumulative net change per day, oldest first. Never empty.
    #[must_use]
    pub fn transaction_series(&self) -> &TransactionSeries {
        &self.views.transaction_series
    }

    /// Totals for a dashboard header.
    #[must_use]
    pub fn summary(&self) -> FinanceSummary {
        self.analytics_service
            .summary(&self.views, self.wallets.len(), self.transactions.len())
    }

    // ── Internal ────────────────────────────────────────────────────

    fn refresh_views(&mut self) {
        self.views = self.analytics_service.derive(
            &self.wallets,
            &self.transactions,
            &self.settings.empty_series_label,
        );
    }

    fn persist_wallets(&self) {
        codec::write_back(self.backend.as_deref(), &self.settings.wallets_key, &self.wallets);
    }

    fn persist_transactions(&self) {
        codec::write_back(
            self.backend.as_deref(),
            &self.settings.transactions_key,
            &self.transactions,
        );
    }

    fn persist_categories(&self) {
        codec::write_back(
            self.backend.as_deref(),
            &self.settings.categories_key,
            &self.categories,
        );
    }
}
