//! Default values for all configuration settings.

use std::path::PathBuf;

use super::file::config_directory;
use super::settings::*;
use crate::coord::{CoordinateFormat, UnitSystem};
use crate::djia::{DEFAULT_CACHE_CAPACITY, DEFAULT_DJIA_URL};
use crate::search::HashMode;

/// Default DJIA fetch timeout in seconds.
pub const DEFAULT_DJIA_TIMEOUT_SECS: u64 = 10;

/// Default hash mode.
pub const DEFAULT_HASH_MODE: HashMode = HashMode::CurrentGraticule;

/// Default coordinate display format.
pub const DEFAULT_COORDINATE_FORMAT: CoordinateFormat = CoordinateFormat::DegreesMinutesSeconds;

/// Default distance unit system.
pub const DEFAULT_UNIT_SYSTEM: UnitSystem = UnitSystem::Metric;

/// Default DJIA cache file (~/.geohashing/djia.json).
pub fn default_cache_file() -> PathBuf {
    crate::store::default_store_path()
}

/// Default log file (~/.geohashing/geohashing.log).
pub fn default_log_file() -> PathBuf {
    config_directory().join("geohashing.log")
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            djia: DjiaSettings {
                url: DEFAULT_DJIA_URL.to_string(),
                timeout: DEFAULT_DJIA_TIMEOUT_SECS,
                cache_capacity: DEFAULT_CACHE_CAPACITY,
                cache_file: default_cache_file(),
            },
            geohash: GeohashSettings {
                mode: DEFAULT_HASH_MODE,
            },
            display: DisplaySettings {
                coordinates: DEFAULT_COORDINATE_FORMAT,
                units: DEFAULT_UNIT_SYSTEM,
            },
            logging: LoggingSettings {
                file: default_log_file(),
            },
        }
    }
}
