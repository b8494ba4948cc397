use thiserror::Error;

/// Unified error type for the finance-tracker-core library.
///
/// Only the persistence and id seams return it. `FinanceStore` logs and
/// swallows these errors, so no store operation surfaces one to the caller.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Codec ───────────────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    // ── Backend ─────────────────────────────────────────────────────
    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Persistence backend unavailable: {0}")]
    BackendUnavailable(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            CoreError::FileIO(e.to_string())
        } else {
            CoreError::Deserialization(e.to_string())
        }
    }
}
