//! Session commands and errors
//!
//! Commands and responses for the actor pattern.

use thiserror::Error;
use tokio::sync::oneshot;

use crate::domain::{PlanResult, PlanType, Stop};
use crate::providers::ProviderError;

use super::SelectionSnapshot;

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    /// A stop-lookup failure, surfaced to the caller unmodified
    #[error("Stop lookup failed: {0}")]
    Lookup(#[from] ProviderError),

    #[error("Session channel closed")]
    ChannelClosed,
}

/// Response from session operations
pub type SessionResponse<T> = Result<T, SessionError>;

/// Commands sent to the session actor
#[derive(Debug)]
pub enum SessionCommand {
    /// Store the origin text and resolve its candidate stops
    SetSource {
        text: String,
        reply: oneshot::Sender<SessionResponse<Vec<Stop>>>,
    },
    /// Store the destination text and resolve its candidate stops
    SetTarget {
        text: String,
        reply: oneshot::Sender<SessionResponse<Vec<Stop>>>,
    },
    /// Store the selected origin stop and trigger a planning cycle
    SetSelectedSource { stop: Option<Stop> },
    /// Store the selected destination stop and trigger a planning cycle
    SetSelectedTarget { stop: Option<Stop> },
    /// Store the selected departure hour and trigger a planning cycle
    SetSelectedTime { time: Option<String> },
    /// Store the selected plan type and trigger a planning cycle
    SetSelectedPlanType { plan_type: Option<PlanType> },
    /// Store the zoom level; does not trigger planning
    SetZoom { zoom: u8 },
    /// A planning task completed; apply its outcome
    ApplyPlan {
        outcome: Result<Option<PlanResult>, ProviderError>,
    },
    /// Read the full selection state
    Snapshot {
        reply: oneshot::Sender<SelectionSnapshot>,
    },
    Shutdown,
}
