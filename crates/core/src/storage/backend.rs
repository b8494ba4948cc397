use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::errors::CoreError;

/// Key-value storage the store persists its collections into.
///
/// Values are serialized JSON documents. The store treats every error as
/// recoverable: failed loads fall back to defaults, failed saves are logged
/// and the in-memory state stays authoritative.
pub trait PersistenceBackend {
    /// Read the value stored under `key`, `None` if nothing was stored.
    fn load(&self, key: &str) -> Result<Option<String>, CoreError>;

    /// Replace the value stored under `key`.
    fn save(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

impl<B: PersistenceBackend + ?Sized> PersistenceBackend for Box<B> {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), CoreError> {
        (**self).save(key, value)
    }
}

/// In-process backend. Clones share the same underlying map, so a handle
/// kept by the caller sees everything the store writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from pre-existing raw values (e.g., data written by another client).
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(RwLock::new(map)),
        }
    }

    /// Raw value currently stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PersistenceBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        let map = self
            .entries
            .read()
            .map_err(|_| CoreError::BackendUnavailable("memory backend lock poisoned".into()))?;
        Ok(map.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut map = self
            .entries
            .write()
            .map_err(|_| CoreError::BackendUnavailable("memory backend lock poisoned".into()))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
