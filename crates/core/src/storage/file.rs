use std::path::{Path, PathBuf};

use crate::errors::CoreError;

use super::backend::PersistenceBackend;

/// Extension of the per-key files.
pub const FILE_EXTENSION: &str = "json";

/// Stores each key as `<dir>/<key>.json` (native only).
///
/// A missing file reads as an absent key.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Use `dir` as the storage root, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`. Rejects keys that could escape the root.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, CoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{FILE_EXTENSION}")))
    }
}

impl PersistenceBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let path = self.path_for(key)?;
        // Atomic replace via a sibling temp file.
        let tmp = path.with_extension(format!("{FILE_EXTENSION}.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

/// Keys must be non-empty, ASCII alphanumerics plus `-`, `_`, `.`, and must
/// not start with `.`.
pub fn validate_key(key: &str) -> Result<(), CoreError> {
    if key.is_empty() {
        return Err(CoreError::InvalidKey("key must not be empty".into()));
    }
    if key.starts_with('.') {
        return Err(CoreError::InvalidKey(format!("'{key}' must not start with '.'")));
    }
    if let Some(bad) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
    {
        return Err(CoreError::InvalidKey(format!(
            "'{key}' contains unsupported character {bad:?}"
        )));
    }
    Ok(())
}
