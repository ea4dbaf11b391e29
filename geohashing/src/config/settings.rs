//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::coord::{CoordinateFormat, UnitSystem};
use crate::search::HashMode;

/// Complete user configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// DJIA source and cache settings
    pub djia: DjiaSettings,
    /// Geohash lookup settings
    pub geohash: GeohashSettings,
    /// Output formatting settings
    pub display: DisplaySettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// DJIA source and cache configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DjiaSettings {
    /// Base URL of the DJIA endpoint
    pub url: String,
    /// Timeout in seconds for a single fetch
    pub timeout: u64,
    /// Number of DJIA values kept on disk (0 disables caching)
    pub cache_capacity: usize,
    /// Path of the DJIA cache file
    pub cache_file: PathBuf,
}

/// Geohash lookup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GeohashSettings {
    /// Current graticule or nearest of the nine surrounding ones
    pub mode: HashMode,
}

/// Output formatting configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    /// How coordinates are printed
    pub coordinates: CoordinateFormat,
    /// Unit system for distances
    pub units: UnitSystem,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
