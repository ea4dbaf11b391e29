//! Bounded DJIA cache.
//!
//! Values are kept in a [`CacheStore`] under `DJIA/yyyy-mm-dd` keys. Because
//! ISO dates sort chronologically, the first key in sorted order is always
//! the oldest entry and is the one evicted when the cache is full.

use std::time::Duration;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::error::DjiaError;
use super::source::DjiaSource;
use crate::store::CacheStore;

/// Prefix of every key written by the cache.
pub const DJIA_KEY_PREFIX: &str = "DJIA/";

/// Number of values kept when no capacity is configured.
pub const DEFAULT_CACHE_CAPACITY: usize = 7;

/// Upper bound on a single fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Store key for a date.
pub fn cache_key(date: NaiveDate) -> String {
    format!("{}{}", DJIA_KEY_PREFIX, date.format("%Y-%m-%d"))
}

fn date_from_key(key: &str) -> Option<NaiveDate> {
    key.strip_prefix(DJIA_KEY_PREFIX)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
}

/// DJIA lookups with a small, persisted, oldest-first cache.
///
/// Fetches run without holding the store lock. Only the eviction, insertion
/// and save that follow a successful fetch are serialized, so a `get` that
/// is dropped mid-fetch leaves the store untouched.
pub struct DjiaCache<S: DjiaSource> {
    source: S,
    store: Mutex<Box<dyn CacheStore>>,
    capacity: usize,
    fetch_timeout: Duration,
}

impl<S: DjiaSource> DjiaCache<S> {
    /// Creates a cache holding at most `capacity` values.
    ///
    /// A capacity of zero disables caching: every lookup fetches and nothing
    /// is stored.
    pub fn new(source: S, store: Box<dyn CacheStore>, capacity: usize) -> Self {
        Self {
            source,
            store: Mutex::new(store),
            capacity,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }

    /// Sets the per-fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Configured capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of cached values.
    pub fn len(&self) -> usize {
        self.djia_keys(&**self.store.lock()).len()
    }

    /// Whether no values are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The underlying data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the DJIA opening value for `date`.
    ///
    /// # Errors
    ///
    /// - `DataUnavailable` if the source has no value for the date
    /// - `Network` if the fetch fails or exceeds the timeout
    /// - `Unknown` for any other failure reported by the source
    /// - `Store` if the value was fetched but could not be persisted
    pub async fn get(&self, date: NaiveDate) -> Result<String, DjiaError> {
        let key = cache_key(date);

        let cached = self.store.lock().get(&key);
        if let Some(value) = cached {
            debug!(date = %date, djia = %value, "DJIA cache hit");
            return Ok(value);
        }

        debug!(date = %date, "DJIA cache miss, fetching");
        let value = match tokio::time::timeout(self.fetch_timeout, self.source.fetch(date)).await {
            Ok(result) => result?,
            Err(_) => {
                warn!(date = %date, timeout_secs = self.fetch_timeout.as_secs_f64(), "DJIA fetch timed out");
                return Err(DjiaError::Network(format!(
                    "DJIA fetch for {} timed out after {:?}",
                    date, self.fetch_timeout
                )));
            }
        };

        info!(date = %date, djia = %value, "DJIA fetched");

        if self.capacity > 0 {
            self.insert(&key, &value)?;
        }

        Ok(value)
    }

    /// Cached `(date, value)` pairs, oldest first.
    pub fn entries(&self) -> Vec<(NaiveDate, String)> {
        let store = self.store.lock();
        self.djia_keys(&**store)
            .into_iter()
            .filter_map(|key| {
                let date = date_from_key(&key)?;
                let value = store.get(&key)?;
                Some((date, value))
            })
            .collect()
    }

    /// Removes every cached value and persists the result.
    ///
    /// Returns the number of entries removed.
    pub fn clear(&self) -> Result<usize, DjiaError> {
        let mut store = self.store.lock();
        let keys = self.djia_keys(&**store);
        for key in &keys {
            store.remove(key);
        }
        store.save()?;
        info!(removed = keys.len(), "DJIA cache cleared");
        Ok(keys.len())
    }

    /// Evicts oldest entries until there is room, then stores and saves.
    ///
    /// If the save fails, the evictions and the insertion are undone so the
    /// store keeps matching what is on disk.
    fn insert(&self, key: &str, value: &str) -> Result<(), DjiaError> {
        let mut store = self.store.lock();

        // A concurrent lookup of the same date may have stored it already.
        if store.contains_key(key) {
            return Ok(());
        }

        let keys = self.djia_keys(&**store);
        let excess = (keys.len() + 1).saturating_sub(self.capacity);
        let mut evicted = Vec::with_capacity(excess);
        for oldest in keys.into_iter().take(excess) {
            if let Some(old_value) = store.remove(&oldest) {
                evicted.push((oldest, old_value));
            }
        }

        store.set(key, value.to_string());
        if let Err(e) = store.save() {
            warn!(key = key, error = %e, "Failed to persist DJIA cache, rolling back");
            store.remove(key);
            for (old_key, old_value) in evicted {
                store.set(&old_key, old_value);
            }
            return Err(e.into());
        }

        for (old_key, _) in &evicted {
            info!(key = %old_key, capacity = self.capacity, "Evicted DJIA cache entry");
        }
        Ok(())
    }

    fn djia_keys(&self, store: &dyn CacheStore) -> Vec<String> {
        store
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(DJIA_KEY_PREFIX))
            .collect()
    }
}
