use std::{
    collections::HashMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use super::{KeyValueStore, Result, StorageError};

/// In-process store with an optional byte quota and switchable write failures.
///
/// Clones share the same entries, so a caller can keep a handle for inspection
/// after moving another clone into a [`PersistenceAdapter`](super::PersistenceAdapter).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    capacity: Option<usize>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryState {
    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects writes once keys and values exceed `bytes` in total.
    pub fn with_capacity(bytes: usize) -> Self {
        let store = Self::default();
        store.write_state().capacity = Some(bytes);
        store
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.write_state().fail_writes = fail;
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.read_state().writes
    }

    /// Reads an entry without going through the fallible trait surface.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.read_state().entries.get(key).cloned()
    }

    /// Seeds an entry directly. Not counted as a write.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.write_state()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    fn read_state(&self) -> RwLockReadGuard<'_, MemoryState> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, MemoryState> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut state = self.write_state();
        if state.fail_writes {
            return Err(StorageError::Unavailable(format!(
                "writes to `{key}` are disabled"
            )));
        }
        if let Some(capacity) = state.capacity {
            let needed = state.used_bytes_without(key) + key.len() + value.len();
            if needed > capacity {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    capacity,
                });
            }
        }
        state.entries.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.write_state().entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("theme", "light").unwrap();
        assert_eq!(handle.raw("theme").as_deref(), Some("light"));
        assert_eq!(handle.write_count(), 1);
    }

    #[test]
    fn quota_rejects_oversized_writes() {
        let store = MemoryStore::with_capacity(16);
        store.set("k", "small").unwrap();
        let err = store.set("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }), "{err:?}");
        assert_eq!(store.raw("k").as_deref(), Some("small"));
    }

    #[test]
    fn disabled_writes_fail_without_side_effects() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(store.set("k", "v").is_err());
        assert!(store.raw("k").is_none());
        assert_eq!(store.write_count(), 0);
    }
}
