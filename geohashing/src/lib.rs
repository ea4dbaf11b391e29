//! Geohashing - deterministic xkcd geohash coordinates
//!
//! Given a date and a one-degree graticule, the [xkcd geohashing] algorithm
//! derives a target point inside that graticule from the MD5 digest of the
//! date and that day's Dow Jones Industrial Average opening value.
//!
//! # Modules
//!
//! - [`digest`]: MD5 over the hash input
//! - [`coord`]: coordinates, graticules, display formatting
//! - [`store`]: persistent key-value storage
//! - [`djia`]: DJIA fetching and bounded caching
//! - [`hash`]: the 30W rule and coordinate derivation
//! - [`search`]: current-graticule and nearest-graticule lookups
//! - [`service`]: the `djia_value` / `geohash` facade
//! - [`config`], [`logging`]: ambient setup for applications
//!
//! [xkcd geohashing]: https://xkcd.com/426/

pub mod config;
pub mod coord;
pub mod digest;
pub mod djia;
pub mod hash;
pub mod logging;
pub mod search;
pub mod service;
pub mod store;

/// Library version, as published in Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
