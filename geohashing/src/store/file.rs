//! JSON file store.
//!
//! The whole map is kept in memory and rewritten on every save. Writes go to
//! a temporary sibling file first and are renamed into place, so a crash
//! mid-save leaves the previous contents intact.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::traits::{CacheStore, StoreError};

/// On-disk format version.
const STORE_VERSION: u32 = 1;

/// Serialized form of the store.
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    entries: BTreeMap<String, String>,
}

/// Store persisted as a JSON document.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first save.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let entries = if path.exists() {
            load_entries(&path)?
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            path = %path.display(),
            entries = entries.len(),
            "Opened cache store"
        );

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Empty store at `path` that replaces the file on the next save.
    ///
    /// Used to recover from a file that [`open`](Self::open) reports as
    /// corrupt; the old contents are never read.
    pub fn reset(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
            dirty: true,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    let file = fs::File::open(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let stored: StoreFile = serde_json::from_reader(reader).map_err(|e| StoreError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if stored.version != STORE_VERSION {
        return Err(StoreError::Corrupt {
            path: path.to_path_buf(),
            reason: format!(
                "unsupported version {} (expected {})",
                stored.version, STORE_VERSION
            ),
        });
    }

    Ok(stored.entries)
}

impl CacheStore for FileStore {
    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    fn count(&self) -> usize {
        self.entries.len()
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn save(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }

        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        let file = fs::File::create(&temp_path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);

        let stored = StoreFile {
            version: STORE_VERSION,
            entries: self.entries.clone(),
        };
        serde_json::to_writer_pretty(&mut writer, &stored)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        writer.flush().map_err(io_err)?;
        drop(writer);

        fs::rename(&temp_path, &self.path).map_err(io_err)?;
        self.dirty = false;

        tracing::debug!(
            path = %self.path.display(),
            entries = self.entries.len(),
            "Saved cache store"
        );

        Ok(())
    }
}

/// Get the default store path (~/.geohashing/djia.json).
pub fn default_store_path() -> PathBuf {
    crate::config::config_directory().join("djia.json")
}
