//! Static map derivation
//!
//! Turns a route's point sequence into a centered, bounded map request and
//! serializes it to a rendering URI.

mod builder;
mod static_map;

pub use builder::{MapRequest, build_map_request};
pub use static_map::{MapRenderer, STATIC_MAP_ENDPOINT, StaticMapRenderer};
