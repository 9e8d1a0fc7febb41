//! Durable key-value storage and the adapter that maps ledger state onto it.

pub mod json_backend;
pub mod memory;
pub mod persistence;

use thiserror::Error;

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
pub use persistence::{PersistenceAdapter, StorageKeys};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures raised by a durable store itself.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("quota exceeded writing `{key}`: {needed} bytes needed, {capacity} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        capacity: usize,
    },
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// String-keyed durable store holding string values.
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}
