//! Configuration key access and validation.
//!
//! Type-safe access to individual settings by their `section.key` name,
//! used by the CLI's `config get|set|list` commands.

use std::str::FromStr;

use thiserror::Error;

use super::parser::{expand_tilde, is_http_url};
use super::settings::ConfigFile;
use super::writer::path_to_string;

/// Errors that can occur when getting or setting configuration values.
#[derive(Debug, Error)]
pub enum ConfigKeyError {
    /// Unknown configuration key.
    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    /// Validation failed for the value.
    #[error("Invalid value for {key}: {reason}")]
    ValidationFailed { key: String, reason: String },
}

/// Supported configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    // DJIA settings
    DjiaUrl,
    DjiaTimeout,
    DjiaCacheCapacity,
    DjiaCacheFile,

    // Geohash settings
    GeohashMode,

    // Display settings
    DisplayCoordinates,
    DisplayUnits,

    // Logging settings
    LoggingFile,
}

impl FromStr for ConfigKey {
    type Err = ConfigKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "djia.url" => Ok(ConfigKey::DjiaUrl),
            "djia.timeout" => Ok(ConfigKey::DjiaTimeout),
            "djia.cache_capacity" => Ok(ConfigKey::DjiaCacheCapacity),
            "djia.cache_file" => Ok(ConfigKey::DjiaCacheFile),
            "geohash.mode" => Ok(ConfigKey::GeohashMode),
            "display.coordinates" => Ok(ConfigKey::DisplayCoordinates),
            "display.units" => Ok(ConfigKey::DisplayUnits),
            "logging.file" => Ok(ConfigKey::LoggingFile),
            _ => Err(ConfigKeyError::UnknownKey(s.to_string())),
        }
    }
}

impl ConfigKey {
    /// Get the canonical key name (e.g., "djia.cache_capacity").
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::DjiaUrl => "djia.url",
            ConfigKey::DjiaTimeout => "djia.timeout",
            ConfigKey::DjiaCacheCapacity => "djia.cache_capacity",
            ConfigKey::DjiaCacheFile => "djia.cache_file",
            ConfigKey::GeohashMode => "geohash.mode",
            ConfigKey::DisplayCoordinates => "display.coordinates",
            ConfigKey::DisplayUnits => "display.units",
            ConfigKey::LoggingFile => "logging.file",
        }
    }

    /// Get the section name (e.g., "djia").
    pub fn section(&self) -> &'static str {
        self.name().split('.').next().unwrap_or("")
    }

    /// Get the key name within the section (e.g., "cache_capacity").
    pub fn key_name(&self) -> &'static str {
        self.name().split('.').nth(1).unwrap_or(self.name())
    }

    /// Get the value from a config file as a string.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::DjiaUrl => config.djia.url.clone(),
            ConfigKey::DjiaTimeout => config.djia.timeout.to_string(),
            ConfigKey::DjiaCacheCapacity => config.djia.cache_capacity.to_string(),
            ConfigKey::DjiaCacheFile => path_to_string(&config.djia.cache_file),
            ConfigKey::GeohashMode => config.geohash.mode.to_string(),
            ConfigKey::DisplayCoordinates => config.display.coordinates.to_string(),
            ConfigKey::DisplayUnits => config.display.units.to_string(),
            ConfigKey::LoggingFile => path_to_string(&config.logging.file),
        }
    }

    /// Set the value in a config file.
    ///
    /// The config is left unchanged if the value is invalid.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigKeyError> {
        let value = value.trim();
        match self {
            ConfigKey::DjiaUrl => {
                if !is_http_url(value) {
                    return Err(self.invalid("must be a URL starting with 'http://' or 'https://'"));
                }
                config.djia.url = value.to_string();
            }
            ConfigKey::DjiaTimeout => {
                config.djia.timeout = match value.parse::<u64>() {
                    Ok(secs) if secs > 0 => secs,
                    _ => return Err(self.invalid("must be a positive integer (seconds)")),
                };
            }
            ConfigKey::DjiaCacheCapacity => {
                config.djia.cache_capacity = value
                    .parse()
                    .map_err(|_| self.invalid("must be a non-negative integer"))?;
            }
            ConfigKey::DjiaCacheFile => {
                config.djia.cache_file = self.path(value)?;
            }
            ConfigKey::GeohashMode => {
                config.geohash.mode = value.parse().map_err(|reason: String| self.invalid(&reason))?;
            }
            ConfigKey::DisplayCoordinates => {
                config.display.coordinates =
                    value.parse().map_err(|reason: String| self.invalid(&reason))?;
            }
            ConfigKey::DisplayUnits => {
                config.display.units = value.parse().map_err(|reason: String| self.invalid(&reason))?;
            }
            ConfigKey::LoggingFile => {
                config.logging.file = self.path(value)?;
            }
        }
        Ok(())
    }

    /// Get all supported configuration keys.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::DjiaUrl,
            ConfigKey::DjiaTimeout,
            ConfigKey::DjiaCacheCapacity,
            ConfigKey::DjiaCacheFile,
            ConfigKey::GeohashMode,
            ConfigKey::DisplayCoordinates,
            ConfigKey::DisplayUnits,
            ConfigKey::LoggingFile,
        ]
    }

    fn path(&self, value: &str) -> Result<std::path::PathBuf, ConfigKeyError> {
        if value.is_empty() {
            return Err(self.invalid("must be a valid path"));
        }
        Ok(expand_tilde(value))
    }

    fn invalid(&self, reason: &str) -> ConfigKeyError {
        ConfigKeyError::ValidationFailed {
            key: self.name().to_string(),
            reason: reason.to_string(),
        }
    }
}
