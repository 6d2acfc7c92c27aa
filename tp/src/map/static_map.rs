//! Static map rendering - MapRequest to URI
//!
//! Rendering is a pure function of the request: the same request always
//! produces the same URI, byte for byte, which is what makes golden-output
//! testing of the map pipeline possible.

use reqwest::Url;
use tracing::debug;

use crate::config::MapCredentials;
use crate::domain::GeoCoordinate;

use super::MapRequest;

/// Google Static Maps API endpoint
pub const STATIC_MAP_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/staticmap";

/// Serializes map requests into renderable URIs
pub trait MapRenderer: Send + Sync {
    /// Produce the URI for a request
    ///
    /// Must be pure and deterministic.
    fn render(&self, request: &MapRequest) -> String;
}

/// Google Static Maps URL renderer
///
/// Holds the credential resolved at startup; every produced URI carries it
/// as the `key` parameter. A missing or invalid key fails at the rendering
/// service, not here.
pub struct StaticMapRenderer {
    credentials: MapCredentials,
}

impl StaticMapRenderer {
    pub fn new(credentials: MapCredentials) -> Self {
        Self { credentials }
    }
}

fn format_point(point: &GeoCoordinate) -> String {
    format!("{},{}", point.latitude, point.longitude)
}

/// Pipe-separated coordinate list; encoded with the rest of the query value
fn join_points(points: &[GeoCoordinate]) -> String {
    points.iter().map(format_point).collect::<Vec<_>>().join("|")
}

impl MapRenderer for StaticMapRenderer {
    fn render(&self, request: &MapRequest) -> String {
        debug!(zoom = request.zoom, points = request.path.len(), "render: called");
        let mut url = Url::parse(STATIC_MAP_ENDPOINT).expect("STATIC_MAP_ENDPOINT is a valid URL");
        url.query_pairs_mut()
            .append_pair("center", &format_point(&request.center))
            .append_pair("zoom", &request.zoom.to_string())
            .append_pair("size", &format!("{}x{}", request.width, request.height))
            .append_pair("language", &request.language)
            .append_pair("path", &join_points(&request.path))
            .append_pair("markers", &join_points(&request.markers))
            .append_pair("key", self.credentials.api_key());
        url.into()
    }
}
