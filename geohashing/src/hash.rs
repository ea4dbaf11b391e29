//! Geohash derivation.
//!
//! A geohash for a graticule origin and date is computed by hashing
//! `"yyyy-mm-dd-<djia>"` with MD5, reading each half of the digest as a
//! fraction in `[0, 1)` and appending those fractions to the origin's whole
//! degrees.
//!
//! # 30W rule
//!
//! From 2008-05-27 on, graticules east of -30° longitude use the DJIA
//! opening value of the *previous* day, so that their hash is known before
//! the New York market opens. The date written into the hash input is always
//! the requested date.

use std::fmt;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::coord::{Coordinate, Graticule, GraticuleOrigin};
use crate::digest::{digest_str, split_halves};
use crate::djia::{DjiaCache, DjiaError, DjiaSource};

/// First date on which the 30W rule is in effect.
pub const W30_VALIDITY_START: NaiveDate = match NaiveDate::from_ymd_opt(2008, 5, 27) {
    Some(date) => date,
    None => panic!("invalid 30W start date"),
};

/// Longitude at and west of which the 30W rule never applies.
const W30_LONGITUDE: f64 = -30.0;

/// 2^64, the denominator that maps a digest half onto `[0, 1)`.
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Largest `f64` below 1.0.
///
/// Halves close to `u64::MAX` round up to 2^64 when converted to `f64`, so
/// fractions are clamped to stay inside the cell.
const MAX_FRACTION: f64 = 1.0 - f64::EPSILON / 2.0;

/// Whether the 30W rule applies to a hash for `origin` on `date`.
pub fn applies_w30_rule(origin: &GraticuleOrigin, date: NaiveDate) -> bool {
    origin.longitude() > W30_LONGITUDE && date >= W30_VALIDITY_START
}

/// Date whose DJIA opening value the hash for `origin` on `date` uses.
pub fn djia_date(origin: &GraticuleOrigin, date: NaiveDate) -> NaiveDate {
    if applies_w30_rule(origin, date) {
        date - Days::new(1)
    } else {
        date
    }
}

/// Latitude and longitude fractions for a date and DJIA value.
///
/// Both are in `[0, 1)`. Pure: the same inputs always give bit-identical
/// output.
pub fn fractions(date: NaiveDate, djia: &str) -> (f64, f64) {
    let input = format!("{}-{}", date.format("%Y-%m-%d"), djia);
    let (first, second) = split_halves(&digest_str(&input));
    (to_fraction(first), to_fraction(second))
}

fn to_fraction(half: u64) -> f64 {
    (half as f64 / TWO_POW_64).min(MAX_FRACTION)
}

/// Outcome of a geohash computation.
///
/// Two results are equal when they name the same date and position; the
/// graticule and rule flag are derived metadata.
#[derive(Debug, Clone, Copy)]
pub struct GeohashResult {
    /// Date the hash is for
    pub date: NaiveDate,
    /// Target position
    pub position: Coordinate,
    /// Graticule enclosing the target
    pub graticule: Graticule,
    /// Whether the previous day's DJIA was used
    pub applies_w30_rule: bool,
}

impl GeohashResult {
    /// Builds a result for a derived position.
    pub fn new(date: NaiveDate, position: Coordinate, applies_w30_rule: bool) -> Self {
        Self {
            date,
            position,
            graticule: Graticule::enclosing(&position),
            applies_w30_rule,
        }
    }
}

impl PartialEq for GeohashResult {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date && self.position == other.position
    }
}

impl fmt::Display for GeohashResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.date, self.position)
    }
}

/// Computes geohashes, resolving DJIA values through a shared cache.
pub struct HashDerivation<S: DjiaSource> {
    cache: Arc<DjiaCache<S>>,
}

impl<S: DjiaSource> Clone for HashDerivation<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<S: DjiaSource> HashDerivation<S> {
    /// Creates a derivation backed by `cache`.
    pub fn new(cache: Arc<DjiaCache<S>>) -> Self {
        Self { cache }
    }

    /// The DJIA cache lookups go through.
    pub fn cache(&self) -> &Arc<DjiaCache<S>> {
        &self.cache
    }

    /// Computes the geohash for `origin` on `date`.
    ///
    /// # Errors
    ///
    /// Returns the `DjiaError` from the DJIA lookup unchanged.
    pub async fn derive(
        &self,
        origin: &GraticuleOrigin,
        date: NaiveDate,
    ) -> Result<Coordinate, DjiaError> {
        let lookup_date = djia_date(origin, date);
        let djia = self.cache.get(lookup_date).await?;
        let position = derive_with_djia(origin, date, &djia);

        debug!(
            origin = %origin,
            date = %date,
            djia_date = %lookup_date,
            position = %position,
            "Derived geohash"
        );

        Ok(position)
    }
}

/// Computes the geohash for `origin` on `date` from a known DJIA value.
///
/// `djia` must be the value for [`djia_date`]`(origin, date)`.
pub fn derive_with_djia(origin: &GraticuleOrigin, date: NaiveDate, djia: &str) -> Coordinate {
    let (lat_fraction, lon_fraction) = fractions(date, djia);
    origin.offset(lat_fraction, lon_fraction)
}
