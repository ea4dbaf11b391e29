//! Service facade for geohash lookups.
//!
//! [`GeohashService`] wires the DJIA cache, hash derivation and graticule
//! search together behind two entry points, `djia_value` and `geohash`.
//! Build one from a [`GeohashConfig`]:
//!
//! ```ignore
//! use geohashing::service::{GeohashConfig, HttpGeohashService};
//!
//! let config = GeohashConfig::from_config_file(&ConfigFile::load()?);
//! let service = HttpGeohashService::from_config(&config)?;
//! let hash = service.geohash(&position, today, config.hash_mode()).await?;
//! ```

mod config;
mod error;
mod facade;

pub use config::{GeohashConfig, GeohashConfigBuilder};
pub use error::ServiceError;
pub use facade::{GeohashService, HttpGeohashService};
