//! Key-value storage port and adapters
//!
//! The services never touch a concrete store. Browsers plug in
//! `localStorage` (see the wasm crate), native front-ends use [`FileStore`],
//! tests use [`MemoryStore`].

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;

/// Persistent string-to-string store shared by everything on one origin
pub trait KeyValueStore {
    /// Read a value. Missing keys are `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a key. Returns `Ok(())` even if the key didn't exist.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Decode a stored JSON array. A missing or blank slot is an empty array.
pub fn decode_array<T: DeserializeOwned>(raw: Option<&str>) -> Result<Vec<T>, serde_json::Error> {
    match raw {
        Some(text) if !text.trim().is_empty() => serde_json::from_str(text),
        _ => Ok(Vec::new()),
    }
}

pub fn encode_array<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}
