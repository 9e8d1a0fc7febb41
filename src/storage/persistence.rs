use tracing::{debug, warn};

use crate::{
    core::theme::Theme,
    errors::{PersistenceReadError, PersistenceWriteError},
    ledger::Transaction,
};

use super::KeyValueStore;

/// Names of the two entries the ledger occupies in the durable store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub transactions: String,
    pub theme: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            transactions: "transactions".into(),
            theme: "theme".into(),
        }
    }
}

/// Maps ledger state onto a [`KeyValueStore`] and contains its failures.
///
/// Reads never fail outward: absent or unreadable entries degrade to an empty
/// ledger and the dark theme. Writes report a [`PersistenceWriteError`] that
/// callers log; nothing is retried.
pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl PersistenceAdapter {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::with_keys(store, StorageKeys::default())
    }

    pub fn with_keys(store: impl KeyValueStore + 'static, keys: StorageKeys) -> Self {
        Self {
            store: Box::new(store),
            keys,
        }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// Reads the stored collection, reporting why it could not be read.
    /// A key that was never written is an empty ledger, not an error.
    pub fn try_load_transactions(&self) -> Result<Vec<Transaction>, PersistenceReadError> {
        let key = &self.keys.transactions;
        let raw = self
            .store
            .get(key)
            .map_err(|source| PersistenceReadError::Store {
                key: key.clone(),
                source,
            })?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| PersistenceReadError::Malformed {
            key: key.clone(),
            source,
        })
    }

    pub fn load_transactions(&self) -> Vec<Transaction> {
        match self.try_load_transactions() {
            Ok(transactions) => transactions,
            Err(err) => {
                warn!(
                    error = %err,
                    "transaction history unreadable, starting with an empty ledger"
                );
                Vec::new()
            }
        }
    }

    pub fn save_transactions(
        &self,
        transactions: &[Transaction],
    ) -> Result<(), PersistenceWriteError> {
        let key = &self.keys.transactions;
        let json = serde_json::to_string(transactions).map_err(|source| {
            PersistenceWriteError::Serialize {
                key: key.clone(),
                source,
            }
        })?;
        self.store
            .set(key, &json)
            .map_err(|source| PersistenceWriteError::Store {
                key: key.clone(),
                source,
            })?;
        debug!(count = transactions.len(), "transactions persisted");
        Ok(())
    }

    pub fn try_load_theme(&self) -> Result<Option<Theme>, PersistenceReadError> {
        let key = &self.keys.theme;
        let raw = self
            .store
            .get(key)
            .map_err(|source| PersistenceReadError::Store {
                key: key.clone(),
                source,
            })?;
        let Some(value) = raw else {
            return Ok(None);
        };
        // Accepts the JSON string form and the bare token.
        let token = serde_json::from_str::<String>(&value).unwrap_or_else(|_| value.clone());
        Theme::from_token(token.trim())
            .map(Some)
            .ok_or_else(|| PersistenceReadError::InvalidToken {
                key: key.clone(),
                value,
            })
    }

    pub fn load_theme(&self) -> Theme {
        match self.try_load_theme() {
            Ok(theme) => theme.unwrap_or_default(),
            Err(err) => {
                warn!(error = %err, "theme preference unreadable, using default");
                Theme::default()
            }
        }
    }

    /// Writes the token as a JSON string.
    pub fn save_theme(&self, theme: Theme) -> Result<(), PersistenceWriteError> {
        let key = &self.keys.theme;
        let json = serde_json::to_string(theme.as_str()).map_err(|source| {
            PersistenceWriteError::Serialize {
                key: key.clone(),
                source,
            }
        })?;
        self.store
            .set(key, &json)
            .map_err(|source| PersistenceWriteError::Store {
                key: key.clone(),
                source,
            })
    }
}
