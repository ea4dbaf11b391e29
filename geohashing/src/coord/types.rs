//! Coordinate type definitions

use std::fmt;

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Mean Earth radius in meters (IUGG).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Largest whole degree a graticule origin can carry on each axis.
const MAX_ORIGIN_LAT: u8 = 89;
const MAX_ORIGIN_LON: u8 = 179;

/// A position in decimal degrees.
///
/// Latitude is in `[-90, 90]` and longitude in `[-180, 180]`; the constructor
/// rejects anything outside those ranges, so every `Coordinate` is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, validating both components.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return Err(CoordError::InvalidLatitude(latitude));
        }
        if !(MIN_LON..=MAX_LON).contains(&longitude) {
            return Err(CoordError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees north.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees east.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Returns this position moved by whole degrees.
    ///
    /// Longitude wraps around the antimeridian. Returns `None` when the
    /// latitude would leave `[-90, 90]`, since there is no cell beyond a pole.
    pub fn shifted(&self, delta_lat: f64, delta_lon: f64) -> Option<Self> {
        let latitude = self.latitude + delta_lat;
        if !(MIN_LAT..=MAX_LAT).contains(&latitude) {
            return None;
        }

        let mut longitude = self.longitude + delta_lon;
        if longitude > MAX_LON {
            longitude -= 360.0;
        } else if longitude < MIN_LON {
            longitude += 360.0;
        }

        Some(Self {
            latitude,
            longitude,
        })
    }

    /// Great-circle distance to another coordinate in meters (haversine).
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lon = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().min(1.0).asin();

        EARTH_RADIUS_M * c
    }

    /// Builds a coordinate from components clamped into the valid ranges.
    fn clamped(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(MIN_LAT, MAX_LAT),
            longitude: longitude.clamp(MIN_LON, MAX_LON),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// A one-by-one degree cell bounded by whole degrees.
///
/// Derived from a position: `north = ceil(lat)`, `south = north - 1`,
/// `west = floor(lon)`, `east = west + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Graticule {
    /// Northern bound in degrees
    pub north: i32,
    /// Southern bound in degrees (`north - 1`)
    pub south: i32,
    /// Western bound in degrees
    pub west: i32,
    /// Eastern bound in degrees (`west + 1`)
    pub east: i32,
}

impl Graticule {
    /// Returns the graticule enclosing a position.
    pub fn enclosing(position: &Coordinate) -> Self {
        let north = position.latitude.ceil() as i32;
        let west = position.longitude.floor() as i32;
        Self {
            north,
            south: north - 1,
            west,
            east: west + 1,
        }
    }

    /// The four corners, going around the cell:
    /// north-west, north-east, south-east, south-west.
    pub fn corners(&self) -> [Coordinate; 4] {
        let (north, south) = (self.north as f64, self.south as f64);
        let (west, east) = (self.west as f64, self.east as f64);
        [
            Coordinate::clamped(north, west),
            Coordinate::clamped(north, east),
            Coordinate::clamped(south, east),
            Coordinate::clamped(south, west),
        ]
    }

    /// Whether a position lies inside this cell (bounds inclusive).
    pub fn contains(&self, position: &Coordinate) -> bool {
        (self.south as f64..=self.north as f64).contains(&position.latitude)
            && (self.west as f64..=self.east as f64).contains(&position.longitude)
    }
}

impl fmt::Display for Graticule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}°N, {}..{}°E",
            self.south, self.north, self.west, self.east
        )
    }
}

/// Whole-degree origin a geohash is built from.
///
/// A hash is placed by adding a fraction to the origin's magnitude, moving
/// away from zero. That gives two distinct cells on each side of the equator
/// and the prime meridian: `0` and `-0`. Degrees are therefore stored as a
/// magnitude plus a hemisphere flag instead of a signed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraticuleOrigin {
    lat_degrees: u8,
    lon_degrees: u8,
    south: bool,
    west: bool,
}

impl GraticuleOrigin {
    /// Creates an origin from signed whole degrees.
    ///
    /// Zero is treated as the northern/eastern cell; use
    /// [`GraticuleOrigin::from_coordinate`] to address the `-0` cells.
    pub fn new(latitude: i32, longitude: i32) -> Result<Self, CoordError> {
        let lat_degrees = latitude.unsigned_abs();
        let lon_degrees = longitude.unsigned_abs();
        if lat_degrees > MAX_ORIGIN_LAT as u32 || lon_degrees > MAX_ORIGIN_LON as u32 {
            return Err(CoordError::InvalidOrigin {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            lat_degrees: lat_degrees as u8,
            lon_degrees: lon_degrees as u8,
            south: latitude < 0,
            west: longitude < 0,
        })
    }

    /// Returns the origin whose hashes fall in the position's enclosing cell.
    ///
    /// Away from whole degrees this is the position truncated toward zero.
    /// On a grid line it follows [`Graticule::enclosing`], so `52.0` hashes
    /// in `51..52` and `-122.0` in `-122..-121`. Positions on a pole or on the
    /// antimeridian belong to the adjacent cell so that every hash stays a
    /// valid coordinate.
    pub fn from_coordinate(position: &Coordinate) -> Self {
        Self::from_graticule(&Graticule::enclosing(position))
    }

    /// Returns the origin whose hashes land inside `graticule`.
    ///
    /// Cells north of the equator grow up from their southern edge, the
    /// others down from their northern edge. Longitude works the same way
    /// around the prime meridian.
    pub fn from_graticule(graticule: &Graticule) -> Self {
        let (lat, south) = if graticule.north > 0 {
            (graticule.south, false)
        } else {
            (-graticule.north, true)
        };
        let (lon, west) = if graticule.west >= 0 {
            (graticule.west, false)
        } else {
            (-graticule.east, true)
        };
        Self {
            lat_degrees: lat.clamp(0, MAX_ORIGIN_LAT as i32) as u8,
            lon_degrees: lon.clamp(0, MAX_ORIGIN_LON as i32) as u8,
            south,
            west,
        }
    }

    /// Signed latitude of the origin (`-0.0` for the southern zero cell).
    pub fn latitude(&self) -> f64 {
        signed(self.lat_degrees, self.south)
    }

    /// Signed longitude of the origin (`-0.0` for the western zero cell).
    pub fn longitude(&self) -> f64 {
        signed(self.lon_degrees, self.west)
    }

    /// Whether the origin is in the southern hemisphere.
    pub fn is_south(&self) -> bool {
        self.south
    }

    /// Whether the origin is in the western hemisphere.
    pub fn is_west(&self) -> bool {
        self.west
    }

    /// Places fractional offsets in `[0, 1)` inside this cell.
    ///
    /// Offsets extend away from zero, so `-122` with `0.544` yields `-122.544`.
    pub fn offset(&self, lat_fraction: f64, lon_fraction: f64) -> Coordinate {
        debug_assert!((0.0..1.0).contains(&lat_fraction));
        debug_assert!((0.0..1.0).contains(&lon_fraction));
        Coordinate {
            latitude: signed_offset(self.lat_degrees, self.south, lat_fraction),
            longitude: signed_offset(self.lon_degrees, self.west, lon_fraction),
        }
    }
}

impl fmt::Display for GraticuleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat_sign = if self.south { "-" } else { "" };
        let lon_sign = if self.west { "-" } else { "" };
        write!(
            f,
            "{}{} {}{}",
            lat_sign, self.lat_degrees, lon_sign, self.lon_degrees
        )
    }
}

fn signed(degrees: u8, negative: bool) -> f64 {
    let magnitude = degrees as f64;
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

fn signed_offset(degrees: u8, negative: bool, fraction: f64) -> f64 {
    let base = degrees as f64;
    // The sum can round up to the next whole degree; stay strictly below it.
    let ceiling = f64::from_bits((base + 1.0).to_bits() - 1);
    let magnitude = (base + fraction).min(ceiling);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Errors that can occur when building coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordError {
    /// Latitude is outside valid range (-90.0 to 90.0)
    InvalidLatitude(f64),
    /// Longitude is outside valid range (-180.0 to 180.0)
    InvalidLongitude(f64),
    /// Origin does not name an existing graticule
    InvalidOrigin { latitude: i32, longitude: i32 },
}

impl fmt::Display for CoordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordError::InvalidLatitude(lat) => {
                write!(
                    f,
                    "Invalid latitude: {} (must be between {} and {})",
                    lat, MIN_LAT, MAX_LAT
                )
            }
            CoordError::InvalidLongitude(lon) => {
                write!(
                    f,
                    "Invalid longitude: {} (must be between {} and {})",
                    lon, MIN_LON, MAX_LON
                )
            }
            CoordError::InvalidOrigin {
                latitude,
                longitude,
            } => {
                write!(
                    f,
                    "Invalid graticule origin: {} {} (must be within ±{} and ±{})",
                    latitude, longitude, MAX_ORIGIN_LAT, MAX_ORIGIN_LON
                )
            }
        }
    }
}

impl std::error::Error for CoordError {}
