//! SessionHandle - client interface for the session actor
//!
//! The handle is cloneable; UI bindings and tests hold clones and issue
//! mutations through it. All operations are async and non-blocking except
//! where a reply is inherently part of the contract (lookups, snapshots).

use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::domain::{PlanType, Stop};

use super::SelectionSnapshot;
use super::messages::{SessionCommand, SessionError, SessionResponse};

/// Handle for interacting with a running session
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    pub(crate) fn new(tx: mpsc::Sender<SessionCommand>) -> Self {
        Self { tx }
    }

    /// Set the origin text; resolves and returns its candidate stops
    ///
    /// A lookup failure comes back unmodified and leaves the previous list
    /// in place.
    pub async fn set_source(&self, text: impl Into<String>) -> SessionResponse<Vec<Stop>> {
        let text = text.into();
        debug!(%text, "SessionHandle::set_source: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::SetSource { text, reply: reply_tx })
            .await
            .map_err(|_| SessionError::ChannelClosed)?;
        reply_rx.await.map_err(|_| SessionError::ChannelClosed)?
    }

    /// Set the destination text; resolves and returns its candidate stops
    pub async fn set_target(&self, text: impl Into<String>) -> SessionResponse<Vec<Stop>> {
        let text = text.into();
        debug!(%text, "SessionHandle::set_target: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::SetTarget { text, reply: reply_tx })
            .await
            .map_err(|_| SessionError::ChannelClosed)?;
        reply_rx.await.map_err(|_| SessionError::ChannelClosed)?
    }

    /// Select the origin stop
    ///
    /// Always triggers one planning cycle, even when the value is unchanged.
    pub async fn set_selected_source(&self, stop: Option<Stop>) -> SessionResponse<()> {
        debug!(?stop, "SessionHandle::set_selected_source: called");
        self.tx
            .send(SessionCommand::SetSelectedSource { stop })
            .await
            .map_err(|_| SessionError::ChannelClosed)
    }

    /// Select the destination stop
    ///
    /// Always triggers one planning cycle, even when the value is unchanged.
    pub async fn set_selected_target(&self, stop: Option<Stop>) -> SessionResponse<()> {
        debug!(?stop, "SessionHandle::set_selected_target: called");
        self.tx
            .send(SessionCommand::SetSelectedTarget { stop })
            .await
            .map_err(|_| SessionError::ChannelClosed)
    }

    /// Select the departure hour
    ///
    /// Always triggers one planning cycle, even when the value is unchanged.
    pub async fn set_selected_time(&self, time: Option<String>) -> SessionResponse<()> {
        debug!(?time, "SessionHandle::set_selected_time: called");
        self.tx
            .send(SessionCommand::SetSelectedTime { time })
            .await
            .map_err(|_| SessionError::ChannelClosed)
    }

    /// Select the plan type
    ///
    /// Always triggers one planning cycle, even when the value is unchanged.
    pub async fn set_selected_plan_type(&self, plan_type: Option<PlanType>) -> SessionResponse<()> {
        debug!(?plan_type, "SessionHandle::set_selected_plan_type: called");
        self.tx
            .send(SessionCommand::SetSelectedPlanType { plan_type })
            .await
            .map_err(|_| SessionError::ChannelClosed)
    }

    /// Set the map zoom level; takes effect on the next map derivation
    pub async fn set_zoom(&self, zoom: u8) -> SessionResponse<()> {
        debug!(zoom, "SessionHandle::set_zoom: called");
        self.tx
            .send(SessionCommand::SetZoom { zoom })
            .await
            .map_err(|_| SessionError::ChannelClosed)
    }

    /// Read the full selection state
    pub async fn snapshot(&self) -> SessionResponse<SelectionSnapshot> {
        debug!("SessionHandle::snapshot: called");
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| SessionError::ChannelClosed)?;
        reply_rx.await.map_err(|_| SessionError::ChannelClosed)
    }

    /// Shut the session down
    pub async fn shutdown(&self) -> SessionResponse<()> {
        debug!("SessionHandle::shutdown: called");
        self.tx
            .send(SessionCommand::Shutdown)
            .await
            .map_err(|_| SessionError::ChannelClosed)
    }
}
