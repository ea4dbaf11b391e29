//! Human-readable rendering of coordinates and distances.

use std::fmt;
use std::str::FromStr;

use super::types::Coordinate;

/// Meters in one international mile.
const METERS_PER_MILE: f64 = 1609.344;

/// How coordinates are rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateFormat {
    /// Decimal degrees with three places, e.g. `37.858°, -122.545°`
    Decimal,
    /// Degrees, minutes and seconds with hemisphere letters, e.g. `N37°51'28", W122°32'40"`
    #[default]
    DegreesMinutesSeconds,
}

impl CoordinateFormat {
    /// Renders a coordinate in this format.
    pub fn format(&self, coordinate: &Coordinate) -> String {
        match self {
            CoordinateFormat::Decimal => format!(
                "{:.3}°, {:.3}°",
                coordinate.latitude(),
                coordinate.longitude()
            ),
            CoordinateFormat::DegreesMinutesSeconds => {
                let ns = if coordinate.latitude() < 0.0 { 'S' } else { 'N' };
                let ew = if coordinate.longitude() < 0.0 { 'W' } else { 'E' };
                format!(
                    "{}{}, {}{}",
                    ns,
                    dms(coordinate.latitude()),
                    ew,
                    dms(coordinate.longitude())
                )
            }
        }
    }

    /// Config file spelling of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoordinateFormat::Decimal => "decimal",
            CoordinateFormat::DegreesMinutesSeconds => "dms",
        }
    }
}

/// Formats the magnitude of an angle as `D°M'S"` with whole, rounded seconds.
fn dms(degrees: f64) -> String {
    let total_seconds = (degrees.abs() * 3600.0).round() as u64;
    let d = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;
    format!("{}°{}'{}\"", d, m, s)
}

impl fmt::Display for CoordinateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CoordinateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "decimal" => Ok(CoordinateFormat::Decimal),
            "dms" => Ok(CoordinateFormat::DegreesMinutesSeconds),
            other => Err(format!(
                "unknown coordinate format '{}' (expected decimal or dms)",
                other
            )),
        }
    }
}

/// Unit system used when displaying distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnitSystem {
    /// Kilometers
    #[default]
    Metric,
    /// Statute miles
    Imperial,
}

impl UnitSystem {
    /// Renders a distance given in meters, e.g. `12.34km` or `7.67mi`.
    pub fn format_distance(&self, meters: f64) -> String {
        match self {
            UnitSystem::Metric => format!("{:.2}km", meters / 1000.0),
            UnitSystem::Imperial => format!("{:.2}mi", meters / METERS_PER_MILE),
        }
    }

    /// Config file spelling of this unit system.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" => Ok(UnitSystem::Metric),
            "imperial" => Ok(UnitSystem::Imperial),
            other => Err(format!(
                "unknown unit system '{}' (expected metric or imperial)",
                other
            )),
        }
    }
}
