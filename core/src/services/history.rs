//! Event history ledger
//!
//! Supports:
//! - Newest-first, append-only event log persisted as one JSON array
//! - Optional size cap with oldest-first eviction
//! - Lenient decoding of missing or corrupt slots
//! - In-memory fallback when the store stops accepting writes

use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use shared::{EventCategory, HistoryEntry};

use crate::clock::{Clock, SystemClock};
use crate::config::{HistoryConfig, StorageConfig, DEFAULT_TIMESTAMP_FORMAT};
use crate::error::StorageError;
use crate::storage::{decode_array, encode_array, KeyValueStore};

/// Where the result of a ledger mutation ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistStatus {
    Persisted,
    /// The store failed; the change lives in memory for this session only
    MemoryOnly { reason: String },
}

impl PersistStatus {
    pub fn is_persisted(&self) -> bool {
        matches!(self, PersistStatus::Persisted)
    }

    /// Non-fatal warning to show the user, if any
    pub fn warning(&self) -> Option<String> {
        match self {
            PersistStatus::Persisted => None,
            PersistStatus::MemoryOnly { reason } => Some(format!(
                "History is not being saved ({}). Entries will be lost when the app closes.",
                reason
            )),
        }
    }
}

/// Result of [`HistoryLedger::append`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appended {
    pub entry: HistoryEntry,
    pub status: PersistStatus,
}

impl Appended {
    pub fn warning(&self) -> Option<String> {
        self.status.warning()
    }
}

struct LedgerState<S> {
    store: S,
    /// Set once the store has failed; from then on this is the ledger
    fallback: Option<Vec<HistoryEntry>>,
}

/// Newest-first log of timestamped events backed by a [`KeyValueStore`].
///
/// Every mutation is a read-modify-write of the whole slot performed under
/// one lock, so appends from different threads are applied one at a time
/// and none is lost.
pub struct HistoryLedger<S, C = SystemClock> {
    state: Mutex<LedgerState<S>>,
    clock: C,
    key: String,
    config: HistoryConfig,
}

impl<S: KeyValueStore> HistoryLedger<S, SystemClock> {
    /// Ledger over `store` under the default `history` key
    pub fn new(store: S, config: HistoryConfig) -> Self {
        Self::with_clock(store, SystemClock, config)
    }
}

impl<S: KeyValueStore, C: Clock> HistoryLedger<S, C> {
    pub fn with_clock(store: S, clock: C, config: HistoryConfig) -> Self {
        Self {
            state: Mutex::new(LedgerState {
                store,
                fallback: None,
            }),
            clock,
            key: StorageConfig::default().history_key,
            config,
        }
    }

    /// Use a different storage slot
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Record an event and return the new entry.
    ///
    /// Never fails: if the store rejects the write the ledger switches to
    /// memory-only for the rest of the session and the returned status
    /// carries a warning.
    pub fn append(&self, category: impl Into<String>, message: impl Into<String>) -> Appended {
        let mut state = self.lock();
        // Stamped under the lock so list order and timestamps agree
        let entry = HistoryEntry::new(self.timestamp(), category, message);

        let mut entries = self.current_entries(&mut state);
        entries.insert(0, entry.clone());
        self.apply_cap(&mut entries);

        let status = self.write(&mut state, entries);
        tracing::debug!("Recorded {} event in {}", entry.category, self.key);

        Appended { entry, status }
    }

    /// Record an event under one of the known categories
    pub fn record(&self, category: EventCategory, message: impl Into<String>) -> Appended {
        self.append(category, message)
    }

    /// All entries, newest first
    pub fn list(&self) -> Vec<HistoryEntry> {
        let mut state = self.lock();
        self.current_entries(&mut state)
    }

    /// Entries with the given category tag, newest first
    pub fn list_by_category(&self, category: &str) -> Vec<HistoryEntry> {
        self.list()
            .into_iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<HistoryEntry> {
        self.list().into_iter().next()
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry. Clearing an empty ledger is a no-op.
    pub fn clear(&self) -> PersistStatus {
        let mut state = self.lock();

        if state.fallback.is_some() {
            // Best effort: the store may have recovered
            if let Err(e) = state.store.remove(&self.key) {
                tracing::debug!("Could not remove {} from degraded store: {}", self.key, e);
            }
            state.fallback = Some(Vec::new());
            return PersistStatus::MemoryOnly {
                reason: "storage unavailable".to_string(),
            };
        }

        match state.store.remove(&self.key) {
            Ok(()) => {
                tracing::info!("Cleared event history in {}", self.key);
                PersistStatus::Persisted
            }
            Err(e) => self.degrade(&mut state, Vec::new(), e),
        }
    }

    /// True once the store has failed and the ledger is memory-only
    pub fn is_degraded(&self) -> bool {
        self.lock().fallback.is_some()
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .store
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn timestamp(&self) -> String {
        let now = self.clock.now();
        let mut formatted = String::new();
        if write!(formatted, "{}", now.format(&self.config.timestamp_format)).is_err() {
            formatted = now.format(DEFAULT_TIMESTAMP_FORMAT).to_string();
        }
        formatted
    }

    fn current_entries(&self, state: &mut LedgerState<S>) -> Vec<HistoryEntry> {
        if let Some(entries) = &state.fallback {
            return entries.clone();
        }

        match state.store.get(&self.key) {
            Ok(raw) => match decode_array(raw.as_deref()) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Ignoring malformed history in {}: {}", self.key, e);
                    Vec::new()
                }
            },
            Err(e) => {
                self.degrade(state, Vec::new(), e);
                Vec::new()
            }
        }
    }

    fn apply_cap(&self, entries: &mut Vec<HistoryEntry>) {
        if let Some(max) = self.config.max_entries {
            if entries.len() > max {
                tracing::debug!(
                    "Evicting {} oldest history entries from {}",
                    entries.len() - max,
                    self.key
                );
                entries.truncate(max);
            }
        }
    }

    fn write(&self, state: &mut LedgerState<S>, entries: Vec<HistoryEntry>) -> PersistStatus {
        if let Some(fallback) = state.fallback.as_mut() {
            *fallback = entries;
            return PersistStatus::MemoryOnly {
                reason: "storage unavailable".to_string(),
            };
        }

        let encoded = match encode_array(&entries) {
            Ok(encoded) => encoded,
            Err(e) => {
                let err = StorageError::Unavailable(format!("could not encode history: {}", e));
                return self.degrade(state, entries, err);
            }
        };

        match state.store.set(&self.key, &encoded) {
            Ok(()) => PersistStatus::Persisted,
            Err(e) => self.degrade(state, entries, e),
        }
    }

    fn degrade(
        &self,
        state: &mut LedgerState<S>,
        entries: Vec<HistoryEntry>,
        err: StorageError,
    ) -> PersistStatus {
        tracing::warn!(
            "History storage failed, keeping {} in memory for this session: {}",
            self.key,
            err
        );
        state.fallback = Some(entries);
        PersistStatus::MemoryOnly {
            reason: err.to_string(),
        }
    }
}
