//! Core trait for key-value cache stores.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or persisting a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file exists but could not be parsed.
    #[error("Corrupt cache file {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// The in-memory contents could not be serialized.
    #[error("Failed to serialize cache: {0}")]
    Serialization(String),
}

/// Persistent string key-value mapping.
///
/// Mutations are buffered in memory until [`save`](CacheStore::save) is
/// called. Implementations are not internally synchronized; callers share a
/// store behind a lock.
pub trait CacheStore: Send {
    /// Whether a value is stored under `key`.
    fn contains_key(&self, key: &str) -> bool;

    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);

    /// Removes `key`, returning its previous value.
    fn remove(&mut self, key: &str) -> Option<String>;

    /// Number of stored entries.
    fn count(&self) -> usize;

    /// All stored keys in ascending order.
    fn keys(&self) -> Vec<String>;

    /// Flushes buffered changes to durable storage.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backing storage cannot be written.
    fn save(&mut self) -> Result<(), StoreError>;
}
