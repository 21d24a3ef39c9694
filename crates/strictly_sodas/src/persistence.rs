//! Key-value persistence for progression and records.
//!
//! The engine never depends on a concrete backend. It reads and writes two
//! keys through [`KeyValueStore`]; any failure falls back to defaults and is
//! logged, never surfaced.

use crate::records::GameRecord;
use derive_more::{Display, Error};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Key holding the JSON array of game records.
pub const RECORDS_KEY: &str = "records";

/// Key holding the highest unlocked level.
pub const MAX_UNLOCKED_KEY: &str = "maxUnlockedLevel";

/// Persistence error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("JSON error: {}", err))
    }
}

/// A string key-value store that survives restarts.
pub trait KeyValueStore {
    /// Reads a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-process store. Used by tests and for play without a database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads stored records. Missing or malformed data yields an empty list.
#[instrument(skip(store))]
pub fn load_records<S: KeyValueStore + ?Sized>(store: &S) -> Vec<GameRecord> {
    let raw = match store.get(RECORDS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored records");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Failed to read records, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<GameRecord>>(&raw) {
        Ok(records) => {
            debug!(count = records.len(), "Records loaded");
            records
        }
        Err(e) => {
            warn!(error = %e, "Stored records are malformed, starting empty");
            Vec::new()
        }
    }
}

/// Saves all records. Failures are logged and swallowed.
#[instrument(skip(store, records), fields(count = records.len()))]
pub fn save_records<S: KeyValueStore + ?Sized>(store: &mut S, records: &[GameRecord]) {
    let result = serde_json::to_string(records)
        .map_err(StoreError::from)
        .and_then(|json| store.set(RECORDS_KEY, &json));
    if let Err(e) = result {
        warn!(error = %e, "Failed to save records");
    }
}

/// Loads the unlock frontier, or `default` when missing or malformed.
#[instrument(skip(store))]
pub fn load_max_unlocked<S: KeyValueStore + ?Sized>(store: &S, default: usize) -> usize {
    match store.get(MAX_UNLOCKED_KEY) {
        Ok(Some(raw)) => match serde_json::from_str::<usize>(raw.trim()) {
            Ok(level) => level,
            Err(e) => {
                warn!(error = %e, raw = %raw, "Stored level is malformed, using default");
                default
            }
        },
        Ok(None) => default,
        Err(e) => {
            warn!(error = %e, "Failed to read unlocked level, using default");
            default
        }
    }
}

/// Saves the unlock frontier. Failures are logged and swallowed.
#[instrument(skip(store))]
pub fn save_max_unlocked<S: KeyValueStore + ?Sized>(store: &mut S, level: usize) {
    if let Err(e) = store.set(MAX_UNLOCKED_KEY, &level.to_string()) {
        warn!(error = %e, "Failed to save unlocked level");
    }
}
