use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::CoreError;

use super::backend::PersistenceBackend;

/// Serialize a collection to the JSON document stored under a key.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string(value)
        .map_err(|e| CoreError::Serialization(format!("Failed to encode collection: {e}")))
}

/// Parse a stored JSON document.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, CoreError> {
    serde_json::from_str(raw)
        .map_err(|e| CoreError::Deserialization(format!("Failed to decode collection: {e}")))
}

/// Read and decode `key`, or return `None` when the key is absent, the
/// backend fails, or the stored document is corrupt. Failures are logged.
pub fn load<T: DeserializeOwned>(backend: Option<&dyn PersistenceBackend>, key: &str) -> Option<T> {
    let Some(backend) = backend else {
        debug!(key, "no persistence backend, using defaults");
        return None;
    };

    let raw = match backend.load(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "nothing stored yet, using defaults");
            return None;
        }
        Err(e) => {
            warn!(key, error = %e, "failed to load collection, using defaults");
            return None;
        }
    };

    match decode(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "stored collection is corrupt, using defaults");
            None
        }
    }
}

/// Like [`load`], substituting `fallback()` when nothing usable is stored.
pub fn load_or<T, F>(backend: Option<&dyn PersistenceBackend>, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    load(backend, key).unwrap_or_else(fallback)
}

/// Write the full collection back under `key`.
///
/// Returns whether the write landed. Failures are logged, never propagated.
pub fn write_back<T: Serialize + ?Sized>(
    backend: Option<&dyn PersistenceBackend>,
    key: &str,
    value: &T,
) -> bool {
    let Some(backend) = backend else {
        return false;
    };

    let result = encode(value).and_then(|raw| backend.save(key, &raw));
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "failed to persist collection, keeping in-memory state");
            false
        }
    }
}
