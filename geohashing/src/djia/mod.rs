//! DJIA opening values: fetching, classification and caching.
//!
//! The geohash for a date depends on the Dow Jones Industrial Average opening
//! value published for that date (or the day before, under the 30W rule).
//! Values are fetched from an HTTP endpoint addressed by year/month/day and
//! kept in a small bounded cache so a device can recompute hashes offline.
//!
//! # Layers
//!
//! ```text
//! DjiaCache ──► CacheStore   (hit: no network)
//!     │
//!     └──────► DjiaSource ──► AsyncHttpClient
//!              (classifies error bodies)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use geohashing::djia::{AsyncReqwestClient, DjiaCache, HttpDjiaSource};
//! use geohashing::store::MemoryStore;
//!
//! let client = AsyncReqwestClient::new(Duration::from_secs(10))?;
//! let source = HttpDjiaSource::new(client, DEFAULT_DJIA_URL);
//! let cache = DjiaCache::new(source, Box::new(MemoryStore::new()), 7);
//! let djia = cache.get(date).await?;
//! ```

mod cache;
mod error;
mod http;
mod source;

pub use cache::{cache_key, DjiaCache, DEFAULT_CACHE_CAPACITY, DEFAULT_FETCH_TIMEOUT, DJIA_KEY_PREFIX};
pub use error::DjiaError;
pub use http::{AsyncHttpClient, AsyncReqwestClient, HttpResponse};
pub use source::{classify_failure, DjiaSource, HttpDjiaSource, DEFAULT_DJIA_URL};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
#[cfg(test)]
pub use source::tests::StaticDjiaSource;
