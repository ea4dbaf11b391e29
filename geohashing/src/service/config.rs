//! Service configuration types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::ConfigFile;
use crate::djia::{DEFAULT_CACHE_CAPACITY, DEFAULT_DJIA_URL, DEFAULT_FETCH_TIMEOUT};
use crate::search::HashMode;

/// Runtime configuration for [`GeohashService`](super::GeohashService).
///
/// Immutable once built; the service never reads settings from anywhere
/// else.
///
/// # Example
///
/// ```
/// use geohashing::service::GeohashConfig;
/// use geohashing::search::HashMode;
///
/// let config = GeohashConfig::builder()
///     .cache_capacity(14)
///     .hash_mode(HashMode::Nearest)
///     .build();
///
/// assert_eq!(config.cache_capacity(), 14);
/// assert!(config.cache_file().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeohashConfig {
    /// Base URL of the DJIA endpoint
    djia_url: String,
    /// Upper bound on one DJIA fetch
    fetch_timeout: Duration,
    /// Number of DJIA values kept (0 disables caching)
    cache_capacity: usize,
    /// File the cache is persisted to; in memory only when `None`
    cache_file: Option<PathBuf>,
    /// Mode used when a caller does not pick one
    hash_mode: HashMode,
}

impl GeohashConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeohashConfigBuilder {
        GeohashConfigBuilder::default()
    }

    /// Build the runtime configuration from the user's config file.
    pub fn from_config_file(config: &ConfigFile) -> Self {
        Self::builder()
            .djia_url(config.djia.url.clone())
            .fetch_timeout(Duration::from_secs(config.djia.timeout))
            .cache_capacity(config.djia.cache_capacity)
            .cache_file(config.djia.cache_file.clone())
            .hash_mode(config.geohash.mode)
            .build()
    }

    /// Get the DJIA endpoint base URL.
    pub fn djia_url(&self) -> &str {
        &self.djia_url
    }

    /// Get the per-fetch timeout.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Get the DJIA cache capacity.
    pub fn cache_capacity(&self) -> usize {
        self.cache_capacity
    }

    /// Get the cache file, if the cache is persisted.
    pub fn cache_file(&self) -> Option<&Path> {
        self.cache_file.as_deref()
    }

    /// Get the default hash mode.
    pub fn hash_mode(&self) -> HashMode {
        self.hash_mode
    }
}

impl Default for GeohashConfig {
    fn default() -> Self {
        Self {
            djia_url: DEFAULT_DJIA_URL.to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_file: None,
            hash_mode: HashMode::default(),
        }
    }
}

/// Builder for GeohashConfig.
#[derive(Debug, Clone, Default)]
pub struct GeohashConfigBuilder {
    djia_url: Option<String>,
    fetch_timeout: Option<Duration>,
    cache_capacity: Option<usize>,
    cache_file: Option<PathBuf>,
    hash_mode: Option<HashMode>,
}

impl GeohashConfigBuilder {
    /// Set the DJIA endpoint base URL.
    pub fn djia_url(mut self, url: impl Into<String>) -> Self {
        self.djia_url = Some(url.into());
        self
    }

    /// Set the per-fetch timeout.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    /// Set the DJIA cache capacity.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Persist the cache to `path`.
    pub fn cache_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_file = Some(path.into());
        self
    }

    /// Set the default hash mode.
    pub fn hash_mode(mut self, mode: HashMode) -> Self {
        self.hash_mode = Some(mode);
        self
    }

    /// Build the configuration, filling unset values with defaults.
    pub fn build(self) -> GeohashConfig {
        let defaults = GeohashConfig::default();
        GeohashConfig {
            djia_url: self.djia_url.unwrap_or(defaults.djia_url),
            fetch_timeout: self.fetch_timeout.unwrap_or(defaults.fetch_timeout),
            cache_capacity: self.cache_capacity.unwrap_or(defaults.cache_capacity),
            cache_file: self.cache_file.or(defaults.cache_file),
            hash_mode: self.hash_mode.unwrap_or(defaults.hash_mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeohashConfig::default();
        assert_eq!(config.djia_url(), DEFAULT_DJIA_URL);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.cache_capacity(), 7);
        assert_eq!(config.hash_mode(), HashMode::CurrentGraticule);
        assert!(config.cache_file().is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeohashConfig::builder()
            .djia_url("http://localhost:8080/djia")
            .fetch_timeout(Duration::from_secs(2))
            .cache_capacity(0)
            .cache_file("/tmp/djia.json")
            .build();

        assert_eq!(config.djia_url(), "http://localhost:8080/djia");
        assert_eq!(config.fetch_timeout(), Duration::from_secs(2));
        assert_eq!(config.cache_capacity(), 0);
        assert_eq!(config.cache_file(), Some(Path::new("/tmp/djia.json")));
        assert_eq!(config.hash_mode(), HashMode::CurrentGraticule);
    }

    #[test]
    fn test_from_config_file() {
        let mut file = ConfigFile::default();
        file.djia.timeout = 4;
        file.djia.cache_capacity = 3;
        file.geohash.mode = HashMode::Nearest;

        let config = GeohashConfig::from_config_file(&file);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(4));
        assert_eq!(config.cache_capacity(), 3);
        assert_eq!(config.hash_mode(), HashMode::Nearest);
        assert_eq!(config.cache_file(), Some(file.djia.cache_file.as_path()));
    }
}
