//! Transit stops and their identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use super::GeoCoordinate;

/// Opaque stop identifier
///
/// The key used by the stop-lookup and planning collaborators. Never parsed
/// or synthesized locally - it only round-trips between the two services.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StopId(String);

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, geolocated transit point
///
/// Immutable once resolved from a lookup. Stop lists own their stops; a
/// selection holds a clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub location: GeoCoordinate,
}

impl Stop {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: GeoCoordinate) -> Self {
        Self {
            id: StopId::new(id),
            name: name.into(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_id_display() {
        let id = StopId::new("central-1");
        assert_eq!(id.to_string(), "central-1");
        assert_eq!(id.as_str(), "central-1");
    }
}
