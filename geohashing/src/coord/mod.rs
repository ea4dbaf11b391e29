//! Graticule geometry
//!
//! Provides the coordinate value types used throughout the crate, the
//! whole-degree cells (graticules) geohashes are computed for, and display
//! helpers for positions and distances.

mod format;
mod types;

pub use format::{CoordinateFormat, UnitSystem};
pub use types::{
    Coordinate, CoordError, Graticule, GraticuleOrigin, EARTH_RADIUS_M, MAX_LAT, MAX_LON,
    MIN_LAT, MIN_LON,
};
