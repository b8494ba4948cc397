pub mod backend;
pub mod codec;
#[cfg(not(target_arch = "wasm32"))]
pub mod file;

pub use backend::{MemoryBackend, PersistenceBackend};
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileBackend;
