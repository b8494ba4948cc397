use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Icon assigned to wallets that don't carry one.
pub const DEFAULT_WALLET_ICON: &str = "account_balance_wallet";

/// A visual style from the fixed wallet palette.
///
/// Styles are never persisted; wallets only store the `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletStyle {
    pub id: &'static str,
    /// Background color token
    pub bg: &'static str,
    /// Text color token
    pub text: &'static str,
    /// Icon background color token
    pub icon_bg: &'static str,
}

/// The wallet palette. The first entry is the default style.
pub static WALLET_STYLES: [WalletStyle; 6] = [
    WalletStyle {
        id: "emerald",
        bg: "bg-emerald-50",
        text: "text-emerald-700",
        icon_bg: "bg-emerald-100",
    },
    WalletStyle {
        id: "indigo",
        bg: "bg-indigo-50",
        text: "text-indigo-700",
        icon_bg: "bg-indigo-100",
    },
    WalletStyle {
        id: "amber",
        bg: "bg-amber-50",
        text: "text-amber-700",
        icon_bg: "bg-amber-100",
    },
    WalletStyle {
        id: "rose",
        bg: "bg-rose-50",
        text: "text-rose-700",
        icon_bg: "bg-rose-100",
    },
    WalletStyle {
        id: "sky",
        bg: "bg-sky-50",
        text: "text-sky-700",
        icon_bg: "bg-sky-100",
    },
    WalletStyle {
        id: "slate",
        bg: "bg-slate-100",
        text: "text-slate-800",
        icon_bg: "bg-white",
    },
];

impl WalletStyle {
    /// The first palette entry.
    pub fn default_style() -> &'static WalletStyle {
        &WALLET_STYLES[0]
    }

    /// Look up a style by id, falling back to the default style.
    pub fn find(style_id: &str) -> &'static WalletStyle {
        WALLET_STYLES
            .iter()
            .find(|s| s.id == style_id)
            .unwrap_or(&WALLET_STYLES[0])
    }

    /// Style for the wallet at `index`, cycling through the palette.
    pub fn for_position(index: usize) -> &'static WalletStyle {
        &WALLET_STYLES[index % WALLET_STYLES.len()]
    }
}

/// A named cash account with a starting balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Starting balance (may be negative)
    #[serde(default)]
    pub initial: f64,

    /// When the wallet was first created
    pub created_at: DateTime<Utc>,

    /// Palette style id. Empty until normalization backfills it.
    #[serde(default)]
    pub style_id: String,

    /// Symbolic icon name. Empty until normalization backfills it.
    #[serde(default)]
    pub icon: String,
}

impl Wallet {
    /// The resolved palette entry for this wallet.
    pub fn style(&self) -> &'static WalletStyle {
        WalletStyle::find(&self.style_id)
    }
}

/// A wallet as found in storage, possibly written by an older version.
///
/// Everything but the id is optional and `createdAt` is kept as text, so
/// one odd entry doesn't make the whole array unreadable. Normalization
/// turns these into [`Wallet`]s.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub initial: f64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub style_id: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl From<Wallet> for WalletRecord {
    fn from(wallet: Wallet) -> Self {
        Self {
            id: wallet.id,
            name: wallet.name,
            initial: wallet.initial,
            created_at: Some(wallet.created_at.to_rfc3339()),
            style_id: Some(wallet.style_id),
            icon: Some(wallet.icon),
        }
    }
}

/// Payload for `upsert_wallet`. Without an `id`, a new wallet is created.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WalletInput {
    pub id: Option<String>,
    pub name: String,
    pub initial: f64,
    pub style_id: Option<String>,
    pub icon: Option<String>,
}

impl WalletInput {
    pub fn new(name: impl Into<String>, initial: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            initial,
            style_id: None,
            icon: None,
        }
    }

    /// Target an existing wallet.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_style(mut self, style_id: impl Into<String>) -> Self {
        self.style_id = Some(style_id.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}
