//! Geographic coordinate value type

use serde::{Deserialize, Serialize};

/// Southernmost valid latitude in degrees
pub const MIN_LATITUDE: f64 = -90.0;
/// Northernmost valid latitude in degrees
pub const MAX_LATITUDE: f64 = 90.0;
/// Westernmost valid longitude in degrees
pub const MIN_LONGITUDE: f64 = -180.0;
/// Easternmost valid longitude in degrees
pub const MAX_LONGITUDE: f64 = 180.0;

/// A latitude/longitude pair in degrees
///
/// Construction never validates or clamps. Coordinates come from external
/// collaborators whose own contracts bound them; an out-of-range value passes
/// through unchanged and yields a nonsensical but non-crashing map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether both fields lie in the conventional WGS84 ranges
    ///
    /// Diagnostic only - nothing in the pipeline rejects out-of-range values.
    pub fn in_range(&self) -> bool {
        (MIN_LATITUDE..=MAX_LATITUDE).contains(&self.latitude)
            && (MIN_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude)
    }
}
