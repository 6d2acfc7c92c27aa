//! Session change events
//!
//! Field-identified notifications published whenever resolved or derived
//! state takes a new value. Events fire on every set: no equality check
//! against the previous value and no coalescing, matching the setters'
//! always-re-trigger contract. Exactly one event per mutation step.

use serde::{Deserialize, Serialize};

use crate::domain::Stop;

/// One published state change, tagged by the field it describes
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Candidate stops for the origin text were resolved
    SourceStops { stops: Vec<Stop> },
    /// Candidate stops for the destination text were resolved
    TargetStops { stops: Vec<Stop> },
    /// The selectable departure hours were published
    Times { times: Vec<String> },
    /// A planning call completed and overwrote the plan lines
    Plan { lines: Vec<String> },
    /// A new static-map URI was derived from route geometry
    MapUri { uri: String },
}

impl SessionEvent {
    /// Name of the state field this event describes
    pub fn field(&self) -> &'static str {
        match self {
            SessionEvent::SourceStops { .. } => "SourceStops",
            SessionEvent::TargetStops { .. } => "TargetStops",
            SessionEvent::Times { .. } => "Times",
            SessionEvent::Plan { .. } => "Plan",
            SessionEvent::MapUri { .. } => "MapUri",
        }
    }
}
