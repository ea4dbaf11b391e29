//! Geohash search across graticules.
//!
//! In [`HashMode::CurrentGraticule`] the hash of the cell containing the
//! position is returned. In [`HashMode::Nearest`] the containing cell and its
//! eight neighbours are hashed and the closest target wins.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use futures::future::try_join_all;
use tracing::debug;

use crate::coord::{Coordinate, GraticuleOrigin};
use crate::djia::{DjiaError, DjiaSource};
use crate::hash::{applies_w30_rule, derive_with_djia, djia_date, GeohashResult, HashDerivation};

/// Which graticules a geohash lookup considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashMode {
    /// Closest target among the containing graticule and its neighbours
    Nearest,
    /// Target in the graticule containing the position
    #[default]
    CurrentGraticule,
}

impl HashMode {
    /// Config file spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashMode::Nearest => "nearest",
            HashMode::CurrentGraticule => "current",
        }
    }
}

impl fmt::Display for HashMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest" => Ok(HashMode::Nearest),
            "current" | "current-graticule" => Ok(HashMode::CurrentGraticule),
            other => Err(format!(
                "unknown hash mode '{}' (expected current or nearest)",
                other
            )),
        }
    }
}

/// Origins of the graticules considered in nearest mode.
///
/// The position is moved by every `(dlat, dlon)` in `{-1, 0, 1}²`, latitude
/// outermost, and truncated. Shifts past a pole are skipped; longitude wraps
/// around the antimeridian.
pub fn candidate_origins(position: &Coordinate) -> Vec<GraticuleOrigin> {
    let mut origins = Vec::with_capacity(9);
    for delta_lat in [-1.0, 0.0, 1.0] {
        for delta_lon in [-1.0, 0.0, 1.0] {
            if let Some(shifted) = position.shifted(delta_lat, delta_lon) {
                origins.push(GraticuleOrigin::from_coordinate(&shifted));
            }
        }
    }
    origins
}

/// Finds the geohash for a position in either mode.
pub struct NearestHashSearch<S: DjiaSource> {
    derivation: HashDerivation<S>,
}

impl<S: DjiaSource> NearestHashSearch<S> {
    /// Creates a search over `derivation`.
    pub fn new(derivation: HashDerivation<S>) -> Self {
        Self { derivation }
    }

    /// The derivation used for each candidate.
    pub fn derivation(&self) -> &HashDerivation<S> {
        &self.derivation
    }

    /// Computes the geohash for `position` on `date`.
    ///
    /// # Errors
    ///
    /// Any failed DJIA lookup aborts the search and is returned unchanged.
    pub async fn search(
        &self,
        position: &Coordinate,
        date: NaiveDate,
        mode: HashMode,
    ) -> Result<GeohashResult, DjiaError> {
        match mode {
            HashMode::CurrentGraticule => self.current(position, date).await,
            HashMode::Nearest => self.nearest(position, date).await,
        }
    }

    async fn current(
        &self,
        position: &Coordinate,
        date: NaiveDate,
    ) -> Result<GeohashResult, DjiaError> {
        let origin = GraticuleOrigin::from_coordinate(position);
        let target = self.derivation.derive(&origin, date).await?;
        Ok(GeohashResult::new(
            date,
            target,
            applies_w30_rule(&origin, date),
        ))
    }

    async fn nearest(
        &self,
        position: &Coordinate,
        date: NaiveDate,
    ) -> Result<GeohashResult, DjiaError> {
        let origins = candidate_origins(position);

        // Candidates share at most two DJIA dates; look each up once.
        let mut lookup_dates: Vec<NaiveDate> =
            origins.iter().map(|origin| djia_date(origin, date)).collect();
        lookup_dates.sort();
        lookup_dates.dedup();

        let cache = self.derivation.cache();
        let values = try_join_all(lookup_dates.iter().map(|d| cache.get(*d))).await?;

        let mut best: Option<(f64, GeohashResult)> = None;
        for origin in &origins {
            let lookup_date = djia_date(origin, date);
            let djia = lookup_dates
                .binary_search(&lookup_date)
                .map(|index| values[index].as_str())
                .map_err(|_| DjiaError::Unknown(format!("no DJIA lookup for {}", lookup_date)))?;
            let target = derive_with_djia(origin, date, djia);
            let distance = position.distance_to(&target);

            debug!(origin = %origin, target = %target, distance_m = distance, "Nearest-mode candidate");

            if best.as_ref().map_or(true, |(shortest, _)| distance < *shortest) {
                best = Some((
                    distance,
                    GeohashResult::new(date, target, applies_w30_rule(origin, date)),
                ));
            }
        }

        best.map(|(_, result)| result)
            .ok_or_else(|| DjiaError::Unknown(format!("no graticule candidates around {}", position)))
    }
}
