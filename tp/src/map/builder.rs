//! Map request derivation from route geometry

use crate::config::MapConfig;
use crate::domain::GeoCoordinate;

/// A structured static-map description
///
/// Built fresh on every update, never mutated after construction. The URI is
/// produced separately by a [`MapRenderer`](super::MapRenderer).
#[derive(Debug, Clone, PartialEq)]
pub struct MapRequest {
    pub center: GeoCoordinate,
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub language: String,
    /// Ordered polyline through every route point
    pub path: Vec<GeoCoordinate>,
    /// Annotation pins; the same points as the path, pin order not meaningful
    pub markers: Vec<GeoCoordinate>,
}

/// Derive a centered, bounded map request from an ordered point sequence
///
/// Returns `None` for an empty sequence - the "nothing to show" case, not an
/// error; callers leave any previous map state untouched.
///
/// The center is the arithmetic mean of the latitudes and of the longitudes.
/// This is not a geodesic centroid; the averaging is part of the rendering
/// contract and must be kept exactly.
///
/// Every point appears both on the path and in the marker set, so each route
/// point renders twice: once as a line vertex, once as a pin.
pub fn build_map_request(points: &[GeoCoordinate], zoom: u8, config: &MapConfig) -> Option<MapRequest> {
    if points.is_empty() {
        return None;
    }

    let count = points.len() as f64;
    let center = GeoCoordinate::new(
        points.iter().map(|p| p.latitude).sum::<f64>() / count,
        points.iter().map(|p| p.longitude).sum::<f64>() / count,
    );

    Some(MapRequest {
        center,
        zoom,
        width: config.width,
        height: config.height,
        language: config.language.clone(),
        path: points.to_vec(),
        markers: points.to_vec(),
    })
}
