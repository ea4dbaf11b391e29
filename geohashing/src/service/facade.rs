//! Geohash service facade.

use std::sync::Arc;

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::config::GeohashConfig;
use super::error::ServiceError;
use crate::coord::Coordinate;
use crate::djia::{AsyncReqwestClient, DjiaCache, DjiaSource, HttpDjiaSource};
use crate::hash::{GeohashResult, HashDerivation};
use crate::search::{HashMode, NearestHashSearch};
use crate::store::{CacheStore, FileStore, MemoryStore};

/// Service backed by the HTTP DJIA endpoint.
pub type HttpGeohashService = GeohashService<HttpDjiaSource<AsyncReqwestClient>>;

/// Entry point for DJIA lookups and geohash computation.
///
/// Owns the DJIA cache; clones of the service are not provided, share it
/// behind an `Arc` instead.
pub struct GeohashService<S: DjiaSource> {
    cache: Arc<DjiaCache<S>>,
    search: NearestHashSearch<S>,
    default_mode: HashMode,
}

impl HttpGeohashService {
    /// Build a service from runtime configuration.
    ///
    /// Uses the configured DJIA endpoint and persists the cache to the
    /// configured file, or keeps it in memory when no file is set.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be created or an existing cache file
    /// cannot be read.
    pub fn from_config(config: &GeohashConfig) -> Result<Self, ServiceError> {
        let client = AsyncReqwestClient::new(config.fetch_timeout())?;
        let source = HttpDjiaSource::new(client, config.djia_url());

        let store: Box<dyn CacheStore> = match config.cache_file() {
            Some(path) => Box::new(FileStore::open(path)?),
            None => Box::new(MemoryStore::new()),
        };

        info!(
            url = config.djia_url(),
            capacity = config.cache_capacity(),
            mode = %config.hash_mode(),
            "Geohash service configured"
        );

        Ok(Self::new(source, store, config))
    }
}

impl<S: DjiaSource> GeohashService<S> {
    /// Create a service over an arbitrary DJIA source and store.
    pub fn new(source: S, store: Box<dyn CacheStore>, config: &GeohashConfig) -> Self {
        let cache = DjiaCache::new(source, store, config.cache_capacity())
            .with_timeout(config.fetch_timeout());
        let cache = Arc::new(cache);
        let search = NearestHashSearch::new(HashDerivation::new(Arc::clone(&cache)));

        Self {
            cache,
            search,
            default_mode: config.hash_mode(),
        }
    }

    /// The configured default mode.
    pub fn default_mode(&self) -> HashMode {
        self.default_mode
    }

    /// The DJIA cache used by this service.
    pub fn cache(&self) -> &DjiaCache<S> {
        &self.cache
    }

    /// DJIA opening value for `date`, exactly as published.
    pub async fn djia_value(&self, date: NaiveDate) -> Result<String, ServiceError> {
        Ok(self.cache.get(date).await?)
    }

    /// Geohash for `position` on `date`.
    #[instrument(skip(self, position), fields(position = %position))]
    pub async fn geohash(
        &self,
        position: &Coordinate,
        date: NaiveDate,
        mode: HashMode,
    ) -> Result<GeohashResult, ServiceError> {
        let result = self.search.search(position, date, mode).await?;
        info!(
            target_position = %result.position,
            graticule = %result.graticule,
            w30 = result.applies_w30_rule,
            "Geohash computed"
        );
        Ok(result)
    }

    /// Geohash for a raw latitude/longitude pair, validating it first.
    pub async fn geohash_at(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
        mode: HashMode,
    ) -> Result<GeohashResult, ServiceError> {
        let position = Coordinate::new(latitude, longitude)?;
        self.geohash(&position, date, mode).await
    }

    /// Like [`geohash`](Self::geohash), but gives up when `cancel` fires.
    ///
    /// A cancelled request returns [`ServiceError::Cancelled`] and leaves the
    /// cache as it was before any unfinished fetch.
    pub async fn geohash_cancellable(
        &self,
        position: &Coordinate,
        date: NaiveDate,
        mode: HashMode,
        cancel: &CancellationToken,
    ) -> Result<GeohashResult, ServiceError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ServiceError::Cancelled),
            result = self.geohash(position, date, mode) => result,
        }
    }
}
