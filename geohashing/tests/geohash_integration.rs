//! Integration tests for the geohash service.
//!
//! These tests verify the complete flow including:
//! - Service entry points → search → derivation → DJIA cache → source
//! - HTTP response classification through `HttpDjiaSource`
//! - Cache persistence and eviction across service restarts
//! - Config file → runtime config → service
//!
//! Run with: `cargo test --test geohash_integration`

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tempfile::TempDir;

use geohashing::config::{ConfigFile, ConfigKey};
use geohashing::coord::{Coordinate, CoordinateFormat, UnitSystem};
use geohashing::djia::{
    AsyncHttpClient, DjiaError, DjiaSource, HttpDjiaSource, HttpResponse, DEFAULT_DJIA_URL,
};
use geohashing::search::HashMode;
use geohashing::service::{GeohashConfig, GeohashService, ServiceError};
use geohashing::store::{CacheStore, FileStore, MemoryStore};

// ============================================================================
// Helper Functions
// ============================================================================

/// DJIA openings for the week the 30W rule was introduced.
const MAY_2008: &[(&str, &str)] = &[
    ("2008-05-20", "13026.04"),
    ("2008-05-21", "12824.94"),
    ("2008-05-22", "12597.69"),
    ("2008-05-23", "12620.90"),
    ("2008-05-24", "12620.90"),
    ("2008-05-25", "12620.90"),
    ("2008-05-26", "12620.90"),
    ("2008-05-27", "12479.63"),
    ("2008-05-28", "12542.90"),
    ("2008-05-29", "12593.87"),
    ("2008-05-30", "12647.36"),
];

/// DJIA source answering from a fixed table and counting fetches.
#[derive(Clone, Default)]
struct TableSource {
    values: Arc<HashMap<NaiveDate, String>>,
    fetches: Arc<AtomicUsize>,
}

impl TableSource {
    fn new(pairs: &[(&str, &str)]) -> Self {
        let values = pairs
            .iter()
            .map(|(d, v)| (date(d), v.to_string()))
            .collect();
        Self {
            values: Arc::new(values),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl DjiaSource for TableSource {
    async fn fetch(&self, date: NaiveDate) -> Result<String, DjiaError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.values
            .get(&date)
            .cloned()
            .ok_or_else(|| DjiaError::DataUnavailable(format!("{} not available", date)))
    }
}

/// HTTP client that serves canned responses keyed by URL path.
#[derive(Clone, Default)]
struct CannedHttpClient {
    responses: Arc<HashMap<String, HttpResponse>>,
}

impl CannedHttpClient {
    fn new(responses: &[(&str, u16, &str)]) -> Self {
        let responses = responses
            .iter()
            .map(|(path, status, body)| {
                (
                    format!("{}/{}", DEFAULT_DJIA_URL, path),
                    HttpResponse {
                        status: *status,
                        body: body.as_bytes().to_vec(),
                    },
                )
            })
            .collect();
        Self {
            responses: Arc::new(responses),
        }
    }
}

impl AsyncHttpClient for CannedHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, DjiaError> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| DjiaError::Network(format!("connection refused: {}", url)))
    }
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn coord(lat: f64, lon: f64) -> Coordinate {
    Coordinate::new(lat, lon).unwrap()
}

fn assert_close(actual: &Coordinate, latitude: f64, longitude: f64) {
    assert!(
        (actual.latitude() - latitude).abs() < 1e-5 && (actual.longitude() - longitude).abs() < 1e-5,
        "expected ({}, {}), got ({})",
        latitude,
        longitude,
        actual
    );
}

// ============================================================================
// Integration Tests
// ============================================================================

/// The example from the original comic, end to end over HTTP.
#[tokio::test]
async fn test_comic_example_over_http() {
    let client = CannedHttpClient::new(&[("2005/5/26", 200, "10458.68\n")]);
    let source = HttpDjiaSource::new(client, DEFAULT_DJIA_URL);
    let service = GeohashService::new(source, Box::new(MemoryStore::new()), &GeohashConfig::default());

    let result = service
        .geohash(&coord(37.421542, -122.085589), date("2005-05-26"), HashMode::CurrentGraticule)
        .await
        .unwrap();

    assert_close(&result.position, 37.857713, -122.544544);
    assert_eq!(result.graticule.north, 38);
    assert_eq!(result.graticule.west, -123);
    assert!(result.graticule.contains(&result.position));
}

/// HTTP failures are classified by their body.
#[tokio::test]
async fn test_http_failures_are_classified() {
    let client = CannedHttpClient::new(&[
        ("2099/1/1", 404, r#"{"error": "data not available yet"}"#),
        ("2008/13/1", 400, r#"{"error": "date format error"}"#),
        ("2008/5/27", 200, ""),
    ]);
    let source = HttpDjiaSource::new(client, DEFAULT_DJIA_URL);
    let service = GeohashService::new(source, Box::new(MemoryStore::new()), &GeohashConfig::default());

    let unavailable = service.djia_value(date("2099-01-01")).await;
    assert!(matches!(
        unavailable,
        Err(ServiceError::Djia(DjiaError::DataUnavailable(_)))
    ));

    let empty = service.djia_value(date("2008-05-27")).await;
    assert!(matches!(empty, Err(ServiceError::Djia(DjiaError::Network(_)))));

    let offline = service.djia_value(date("2008-05-28")).await;
    assert!(matches!(offline, Err(ServiceError::Djia(DjiaError::Network(_)))));

    assert!(service.cache().is_empty());
}

/// East of 30W the hash switches to the previous day's DJIA on 2008-05-27.
#[tokio::test]
async fn test_w30_rule_through_service() {
    let source = TableSource::new(MAY_2008);
    let service = GeohashService::new(source, Box::new(MemoryStore::new()), &GeohashConfig::default());

    let before_west = service
        .geohash(&coord(68.5, -30.5), date("2008-05-26"), HashMode::CurrentGraticule)
        .await
        .unwrap();
    let before_east = service
        .geohash(&coord(68.5, -29.5), date("2008-05-26"), HashMode::CurrentGraticule)
        .await
        .unwrap();
    assert!(!before_east.applies_w30_rule);
    assert_eq!(
        before_west.position.latitude(),
        before_east.position.latitude()
    );

    let after_west = service
        .geohash(&coord(68.5, -30.5), date("2008-05-27"), HashMode::CurrentGraticule)
        .await
        .unwrap();
    let after_east = service
        .geohash(&coord(68.5, -29.5), date("2008-05-27"), HashMode::CurrentGraticule)
        .await
        .unwrap();
    assert!(after_east.applies_w30_rule);
    assert!(!after_west.applies_w30_rule);
    assert_close(&after_west.position, 68.20968, -30.10144);
    assert_close(&after_east.position, 68.12537, -29.57711);
}

/// Values survive a restart, and a smaller capacity trims the oldest ones.
#[tokio::test]
async fn test_cache_persists_and_shrinks_across_restarts() {
    let temp = TempDir::new().unwrap();
    let cache_file = temp.path().join("djia.json");

    let source = TableSource::new(MAY_2008);
    {
        let config = GeohashConfig::builder().cache_capacity(7).build();
        let store = FileStore::open(&cache_file).unwrap();
        let service = GeohashService::new(source.clone(), Box::new(store), &config);

        for day in 20..=30 {
            let d = NaiveDate::from_ymd_opt(2008, 5, day).unwrap();
            service.djia_value(d).await.unwrap();
        }
        assert_eq!(service.cache().len(), 7);
        assert_eq!(service.cache().entries()[0].0, date("2008-05-24"));
    }
    assert_eq!(source.fetches(), 11);

    let config = GeohashConfig::builder().cache_capacity(3).build();
    let store = FileStore::open(&cache_file).unwrap();
    let service = GeohashService::new(source.clone(), Box::new(store), &config);

    // Cached from the previous run: no fetch, no eviction.
    assert_eq!(service.djia_value(date("2008-05-30")).await.unwrap(), "12647.36");
    assert_eq!(source.fetches(), 11);
    assert_eq!(service.cache().len(), 7);

    // A miss evicts down to capacity before inserting.
    service.djia_value(date("2008-05-20")).await.unwrap();
    let cached: Vec<NaiveDate> = service.cache().entries().into_iter().map(|(d, _)| d).collect();
    assert_eq!(
        cached,
        vec![date("2008-05-20"), date("2008-05-29"), date("2008-05-30")]
    );

    let reopened = FileStore::open(&cache_file).unwrap();
    assert_eq!(reopened.count(), 3);
}

/// Capacity zero never touches the store.
#[tokio::test]
async fn test_capacity_zero_fetches_every_time() {
    let temp = TempDir::new().unwrap();
    let cache_file = temp.path().join("djia.json");
    let source = TableSource::new(MAY_2008);

    let config = GeohashConfig::builder().cache_capacity(0).build();
    let store = FileStore::open(&cache_file).unwrap();
    let service = GeohashService::new(source.clone(), Box::new(store), &config);

    for _ in 0..3 {
        service.djia_value(date("2008-05-28")).await.unwrap();
    }
    assert_eq!(source.fetches(), 3);
    assert!(!cache_file.exists());
}

/// Near a graticule edge, nearest mode can pick a neighbouring cell.
#[tokio::test]
async fn test_nearest_mode_crosses_graticule_boundary() {
    let source = TableSource::new(MAY_2008);
    let service = GeohashService::new(source.clone(), Box::new(MemoryStore::new()), &GeohashConfig::default());
    let position = coord(68.99, -29.99);

    let nearest = service
        .geohash(&position, date("2008-05-28"), HashMode::Nearest)
        .await
        .unwrap();
    let current = service
        .geohash(&position, date("2008-05-28"), HashMode::CurrentGraticule)
        .await
        .unwrap();

    assert_close(&nearest.position, 68.68745, -30.21221);
    assert_close(&current.position, 68.71044, -29.11273);
    assert_ne!(nearest.graticule, current.graticule);
    assert_eq!(source.fetches(), 2);
}

/// Settings written through the config keys drive the service.
#[tokio::test]
async fn test_config_file_drives_service() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("config.ini");

    let mut file = ConfigFile::default();
    ConfigKey::GeohashMode.set(&mut file, "nearest").unwrap();
    ConfigKey::DjiaCacheCapacity.set(&mut file, "2").unwrap();
    ConfigKey::DjiaCacheFile
        .set(&mut file, temp.path().join("djia.json").to_str().unwrap())
        .unwrap();
    ConfigKey::DisplayCoordinates.set(&mut file, "decimal").unwrap();
    file.save_to(&config_path).unwrap();

    let loaded = ConfigFile::load_from(&config_path).unwrap();
    let config = GeohashConfig::from_config_file(&loaded);
    assert_eq!(config.hash_mode(), HashMode::Nearest);
    assert_eq!(config.cache_capacity(), 2);

    let store = FileStore::open(config.cache_file().unwrap()).unwrap();
    let service = GeohashService::new(TableSource::new(MAY_2008), Box::new(store), &config);
    let result = service
        .geohash(&coord(68.5, -30.5), date("2008-05-27"), service.default_mode())
        .await
        .unwrap();

    assert_eq!(
        loaded.display.coordinates.format(&result.position),
        format!(
            "{:.3}°, {:.3}°",
            result.position.latitude(),
            result.position.longitude()
        )
    );
    assert!(service.cache().len() <= 2);
}

/// Display helpers render distances to the hash in both unit systems.
#[tokio::test]
async fn test_distance_formatting() {
    let service = GeohashService::new(
        TableSource::new(MAY_2008),
        Box::new(MemoryStore::new()),
        &GeohashConfig::default(),
    );
    let position = coord(68.5, -30.5);
    let result = service
        .geohash(&position, date("2008-05-28"), HashMode::CurrentGraticule)
        .await
        .unwrap();

    let meters = position.distance_to(&result.position);
    let metric = UnitSystem::Metric.format_distance(meters);
    let imperial = UnitSystem::Imperial.format_distance(meters);
    assert!(metric.ends_with("km"));
    assert!(imperial.ends_with("mi"));

    let dms = CoordinateFormat::DegreesMinutesSeconds.format(&result.position);
    assert!(dms.starts_with("N68°"));
    assert!(dms.contains(", W30°"));
}
