use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::warn;

/// Source of unique record ids.
pub trait IdGenerator {
    /// A string not used by any live record in this process.
    fn next_id(&self) -> String;
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_id(&self) -> String {
        (**self).next_id()
    }
}

/// Random v4 UUIDs from the OS random source.
///
/// When no random source is available (e.g., a sandboxed WASM host), falls
/// back to `<millis>-<hex suffix>`: the clock's nanoseconds followed by a
/// process-wide counter, unique within the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

static FALLBACK_COUNTER: AtomicU64 = AtomicU64::new(0);

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Timestamp-plus-suffix id, used when `getrandom` fails.
    pub fn fallback_id() -> String {
        let now = Utc::now();
        let seq = FALLBACK_COUNTER.fetch_add(1, Ordering::Relaxed);
        format!(
            "{}-{:08x}{seq:x}",
            now.timestamp_millis(),
            now.timestamp_subsec_nanos()
        )
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        let mut bytes = [0u8; 16];
        match getrandom::getrandom(&mut bytes) {
            Ok(()) => uuid::Builder::from_random_bytes(bytes)
                .into_uuid()
                .to_string(),
            Err(e) => {
                warn!(error = %e, "random source unavailable, using timestamp id");
                Self::fallback_id()
            }
        }
    }
}

/// Deterministic `<prefix>-<n>` ids, starting at 1.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.prefix)
    }
}
