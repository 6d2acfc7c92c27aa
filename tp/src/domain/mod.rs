//! Domain types for trip planning
//!
//! Plain value types shared by the session, the collaborator clients, and
//! the map pipeline.

mod geo;
mod plan;
mod stop;

pub use geo::{GeoCoordinate, MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
pub use plan::{PlanQuery, PlanResult, PlanType};
pub use stop::{Stop, StopId};
