//! `localStorage` adapter for the core key-value port

use floodguard_core::storage::KeyValueStore;
use floodguard_core::StorageError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

/// The origin's `localStorage`.
///
/// When the browser refuses access (private mode, disabled storage,
/// sandboxed iframe) every operation reports [`StorageError::Unavailable`]
/// and the history ledger falls back to memory.
#[derive(Clone)]
pub struct LocalStorage {
    storage: Result<Storage, String>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = match web_sys::window() {
            None => Err("no window object".to_string()),
            Some(window) => match window.local_storage() {
                Ok(Some(storage)) => Ok(storage),
                Ok(None) => Err("localStorage is disabled".to_string()),
                Err(e) => Err(describe(&e)),
            },
        };

        if let Err(reason) = &storage {
            tracing::warn!("localStorage unavailable: {}", reason);
        }
        Self { storage }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_ok()
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .map_err(|reason| StorageError::Unavailable(reason.clone()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(describe(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| write_error(key, &e))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(describe(&e)))
    }
}

fn write_error(key: &str, err: &JsValue) -> StorageError {
    let quota = err.dyn_ref::<DomException>().is_some_and(|dom| {
        // Firefox used its own name before adopting the standard one
        matches!(
            dom.name().as_str(),
            "QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED"
        )
    });
    if quota {
        StorageError::QuotaExceeded {
            key: key.to_string(),
        }
    } else {
        StorageError::Unavailable(describe(err))
    }
}

fn describe(err: &JsValue) -> String {
    if let Some(dom) = err.dyn_ref::<DomException>() {
        return format!("{}: {}", dom.name(), dom.message());
    }
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string()
        .unwrap_or_else(|| "unknown storage error".to_string())
}
