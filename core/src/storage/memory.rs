use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::StorageError;

use super::KeyValueStore;

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
    disabled: bool,
}

impl MemoryState {
    fn used_bytes_with(&self, key: &str, value: &str) -> usize {
        let others: usize = self
            .entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }
}

/// In-memory store with optional quota, for tests and headless callers.
///
/// Clones share the same contents, the way every `localStorage` handle on
/// one origin sees the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once keys and values exceed `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        let store = Self::default();
        store.lock().quota_bytes = Some(bytes);
        store
    }

    /// Make every operation fail with [`StorageError::Unavailable`]
    pub fn set_disabled(&self, disabled: bool) {
        self.lock().disabled = disabled;
    }

    /// Raw stored text, bypassing any quota or disabled flag
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().entries.get(key).cloned()
    }

    /// Store raw text, bypassing any quota or disabled flag
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.lock()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let state = self.lock();
        if state.disabled {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        Ok(state.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut state = self.lock();
        if state.disabled {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        if let Some(quota) = state.quota_bytes {
            if state.used_bytes_with(key, value) > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }
        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut state = self.lock();
        if state.disabled {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        state.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_contents() {
        let mut a = MemoryStore::new();
        let b = a.clone();
        a.set("history", "[]").unwrap();
        assert_eq!(b.get("history").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        let mut store = MemoryStore::with_quota(20);
        store.set("k", "0123456789").unwrap();
        // Replacing the value must not count the old one
        store.set("k", "9876543210").unwrap();
        assert!(matches!(
            store.set("other", "0123456789"),
            Err(StorageError::QuotaExceeded { .. })
        ));
    }

    #[test]
    fn test_disabled_store_fails_everything() {
        let mut store = MemoryStore::new();
        store.set_disabled(true);
        assert!(store.get("k").is_err());
        assert!(store.set("k", "v").is_err());
        assert!(store.remove("k").is_err());
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove("nothing").is_ok());
    }
}
