//! Trip planner presentation coordinator
//!
//! Tracks the user's trip selections (origin, destination, departure hour,
//! plan type), recomputes the trip plan through an external planning service
//! whenever a relevant selection changes, and derives a static-map URI from
//! the returned route geometry.
//!
//! # Core behavior
//!
//! - **Always re-trigger**: every selection set schedules one planning call,
//!   even when the value did not change. No debounce, no equality check.
//! - **Last completion wins**: planning calls are fire-and-forget with no
//!   cancellation; overlapping completions apply in arrival order.
//! - **Derived map**: the map centers on the arithmetic mean of the route
//!   points, and every point renders both as a path vertex and as a pin.
//! - **Absent plan is not an error**: it clears the plan text and leaves
//!   the previous map in place.
//!
//! # Modules
//!
//! - [`session`] - selection state actor and plan coordination
//! - [`providers`] - stop-lookup and planner collaborator clients
//! - [`map`] - map request derivation and static-map rendering
//! - [`events`] - change-notification bus
//! - [`domain`] - shared value types
//! - [`config`] - configuration types and loading

pub mod config;
pub mod domain;
pub mod events;
pub mod map;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::{Config, MapConfig, MapCredentials, PlannerConfig};
pub use domain::{GeoCoordinate, PlanQuery, PlanResult, PlanType, Stop, StopId};
pub use events::{DEFAULT_CHANNEL_CAPACITY, EventBus, SessionEvent};
pub use map::{MapRenderer, MapRequest, StaticMapRenderer, build_map_request};
pub use providers::{HttpPlanService, Planner, ProviderError, StopLookup};
pub use session::{SelectionSnapshot, Session, SessionCommand, SessionError, SessionHandle, SessionResponse};
