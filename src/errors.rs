use thiserror::Error;

use crate::storage::StorageError;

/// Rejection of user-supplied transaction input. Raised before any mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount is required")]
    Missing,
    #[error("amount `{0}` is not a number")]
    NotANumber(String),
    #[error("amount `{0}` must be greater than 0")]
    NotPositive(String),
    #[error("amount `{0}` is too large")]
    OutOfRange(String),
}

/// A storage entry could not be read back. Always recovered by the caller
/// substituting the empty or default value.
#[derive(Debug, Error)]
pub enum PersistenceReadError {
    #[error("reading `{key}` failed: {source}")]
    Store {
        key: String,
        #[source]
        source: StorageError,
    },
    #[error("stored `{key}` entry is malformed: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored `{key}` entry holds unknown token `{value}`")]
    InvalidToken { key: String, value: String },
}

/// A storage write did not land. In-memory state stays authoritative.
#[derive(Debug, Error)]
pub enum PersistenceWriteError {
    #[error("serializing `{key}` failed: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("writing `{key}` failed: {source}")]
    Store {
        key: String,
        #[source]
        source: StorageError,
    },
}

impl PersistenceWriteError {
    pub fn key(&self) -> &str {
        match self {
            Self::Serialize { key, .. } | Self::Store { key, .. } => key,
        }
    }
}

/// Error type that captures every failure the ledger engine can surface.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("Persistence read error: {0}")]
    Read(#[from] PersistenceReadError),
    #[error("Persistence write error: {0}")]
    Write(#[from] PersistenceWriteError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
