//! Plan types, queries, and results

use serde::{Deserialize, Serialize};

use super::{GeoCoordinate, StopId};

/// Constraint on acceptable routes
///
/// Closed set, supplied to the UI once at startup via [`PlanType::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanType {
    /// A single ride, no transfer
    Direct,
    /// One transfer at a shared stop, no walking between stops
    OneSwitchNoWalking,
    /// One transfer with at most 500 meters of walking
    OneSwitchLessThanFiveHundredMeters,
}

impl PlanType {
    /// Every selectable plan type, in presentation order
    pub const ALL: [PlanType; 3] = [
        PlanType::Direct,
        PlanType::OneSwitchNoWalking,
        PlanType::OneSwitchLessThanFiveHundredMeters,
    ];
}

/// The four planning inputs
///
/// Any of them may be unset when the user has not yet made that selection.
/// The query is sent as-is; the planning collaborator's contract defines
/// partial-input behavior (typically an absent result).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanQuery {
    pub source: Option<StopId>,
    pub target: Option<StopId>,
    pub time: Option<String>,
    pub plan_type: Option<PlanType>,
}

/// One completed planning response
///
/// Human-readable trip instructions plus the route geometry (stops and path
/// vertices, in travel order). Transient: superseded by the next completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub lines: Vec<String>,
    pub markers: Vec<GeoCoordinate>,
}
