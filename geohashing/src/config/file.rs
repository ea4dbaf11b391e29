//! Configuration file handling for ~/.geohashing/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], defaults in
//! [`super::defaults`], parsing in [`super::parser`], and serialization in
//! [`super::writer`].

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.geohashing/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.geohashing/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }
}

/// Get the path to the config directory (~/.geohashing).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".geohashing")
}

/// Get the path to the config file (~/.geohashing/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::{CoordinateFormat, UnitSystem};
    use crate::djia::{DEFAULT_CACHE_CAPACITY, DEFAULT_DJIA_URL};
    use crate::search::HashMode;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.djia.url, DEFAULT_DJIA_URL);
        assert_eq!(config.djia.timeout, 10);
        assert_eq!(config.djia.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert!(config.djia.cache_file.ends_with(".geohashing/djia.json"));
        assert_eq!(config.geohash.mode, HashMode::CurrentGraticule);
        assert_eq!(config.display.coordinates, CoordinateFormat::DegreesMinutesSeconds);
        assert_eq!(config.display.units, UnitSystem::Metric);
        assert!(config.logging.file.ends_with(".geohashing/geohashing.log"));
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.djia.url = "https://djia.example.org/v1".to_string();
        config.djia.timeout = 3;
        config.djia.cache_capacity = 0;
        config.djia.cache_file = temp_dir.path().join("values.json");
        config.geohash.mode = HashMode::Nearest;
        config.display.coordinates = CoordinateFormat::Decimal;
        config.display.units = UnitSystem::Imperial;
        config.logging.file = temp_dir.path().join("run.log");

        config.save_to(&config_path).unwrap();
        let reloaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");
        std::fs::write(&config_path, "[geohash]\nmode = closest\n").unwrap();

        let err = ConfigFile::load_from(&config_path).unwrap_err();
        match err {
            ConfigFileError::InvalidValue {
                section, key, value, ..
            } => {
                assert_eq!(section, "geohash");
                assert_eq!(key, "mode");
                assert_eq!(value, "closest");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_config_paths() {
        assert!(config_directory().ends_with(".geohashing"));
        assert!(config_file_path().ends_with(".geohashing/config.ini"));
    }
}
