//! Community volunteer registry
//!
//! The list belongs to the community page, not to the history ledger, but
//! it lives in the same store and follows the same lenient decoding.

use std::sync::{Mutex, MutexGuard, PoisonError};

use shared::{validate_volunteer, Volunteer};

use crate::config::StorageConfig;
use crate::error::{CoreError, CoreResult};
use crate::storage::{decode_array, encode_array, KeyValueStore};

/// Volunteer contacts, oldest first
pub struct VolunteerRegistry<S> {
    store: Mutex<S>,
    key: String,
}

impl<S: KeyValueStore> VolunteerRegistry<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
            key: StorageConfig::default().volunteers_key,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// All volunteers. A missing or corrupt slot reads as empty.
    pub fn list(&self) -> CoreResult<Vec<Volunteer>> {
        let store = self.lock();
        self.read(&store)
    }

    /// Validate and add a volunteer at the end of the list
    pub fn add(&self, volunteer: Volunteer) -> CoreResult<Vec<Volunteer>> {
        validate_volunteer(&volunteer)
            .map_err(|(field, message)| CoreError::validation(field, message))?;

        let mut store = self.lock();
        let mut volunteers = self.read(&store)?;
        volunteers.push(volunteer);

        let encoded = encode_array(&volunteers)?;
        store.set(&self.key, &encoded)?;
        tracing::info!("Volunteer added, {} registered", volunteers.len());

        Ok(volunteers)
    }

    pub fn into_store(self) -> S {
        self.store.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, S> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn read(&self, store: &S) -> CoreResult<Vec<Volunteer>> {
        let raw = store.get(&self.key)?;
        Ok(decode_array(raw.as_deref()).unwrap_or_else(|e| {
            tracing::warn!("Ignoring malformed volunteer list in {}: {}", self.key, e);
            Vec::new()
        }))
    }
}
