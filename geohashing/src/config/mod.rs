//! User configuration stored in `~/.geohashing/config.ini`.
//!
//! [`ConfigFile`] is the editable, on-disk form of the settings. The CLI reads
//! and writes individual values through [`ConfigKey`]; the library only ever
//! sees the immutable [`GeohashConfig`](crate::service::GeohashConfig) built
//! from it.

mod defaults;
mod file;
mod keys;
mod parser;
mod settings;
mod writer;

pub use defaults::{
    default_cache_file, default_log_file, DEFAULT_COORDINATE_FORMAT, DEFAULT_DJIA_TIMEOUT_SECS,
    DEFAULT_HASH_MODE, DEFAULT_UNIT_SYSTEM,
};
pub use file::{config_directory, config_file_path, ConfigFileError};
pub use keys::{ConfigKey, ConfigKeyError};
pub use settings::{ConfigFile, DisplaySettings, DjiaSettings, GeohashSettings, LoggingSettings};
