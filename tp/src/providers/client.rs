//! Collaborator trait definitions

use async_trait::async_trait;

use crate::domain::{PlanQuery, PlanResult, Stop};

use super::ProviderError;

/// Stop resolution by free-text query
#[async_trait]
pub trait StopLookup: Send + Sync {
    /// Resolve free text to an ordered list of candidate stops
    ///
    /// May return an empty list. Failures surface to the caller unmodified -
    /// no retry, no masking.
    async fn lookup_stops(&self, query: &str) -> Result<Vec<Stop>, ProviderError>;
}

/// Trip plan computation
///
/// Stateless: each call is independent and keyed only by the query.
#[async_trait]
pub trait Planner: Send + Sync {
    /// Compute a plan for the given selections
    ///
    /// Absent selections are passed through as-is; the planner's own
    /// contract defines partial-input behavior. `Ok(None)` means "no plan
    /// available" and is a normal outcome, not an error.
    async fn compute_plan(&self, query: PlanQuery) -> Result<Option<PlanResult>, ProviderError>;
}
