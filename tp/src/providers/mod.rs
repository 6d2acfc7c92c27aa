//! External collaborator clients
//!
//! The session depends on two async collaborators: stop lookup by free
//! text and plan computation by stop ids, time, and plan type. Both are
//! traits so tests can script them; [`HttpPlanService`] implements both
//! against the planning service's HTTP API.

mod client;
mod error;
mod http;

pub use client::{Planner, StopLookup};
pub use error::ProviderError;
pub use http::HttpPlanService;

#[cfg(test)]
pub use client::mock;
