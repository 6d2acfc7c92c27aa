//! Event bus - pub/sub channel for session state changes
//!
//! The bus uses a tokio broadcast channel to deliver events to all
//! subscribers. The session emits, consumers (UI bindings, loggers, tests)
//! subscribe.

use tokio::sync::broadcast;
use tracing::debug;

use super::types::SessionEvent;

/// Default channel capacity (events)
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Change-notification channel for session state
///
/// Cloning shares the underlying channel, so a clone can be handed to the
/// session while the original keeps producing subscribers.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SessionEvent>,
}

impl EventBus {
    /// Create a new event bus with the given capacity
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "EventBus::new: creating event bus");
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create a new event bus with default capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Emit an event to all subscribers
    ///
    /// Fire-and-forget: no subscribers is fine, and a full channel drops the
    /// oldest events. Every call produces exactly one notification - equal
    /// values are not deduplicated.
    pub fn emit(&self, event: SessionEvent) {
        debug!(field = event.field(), "EventBus::emit");
        // Ignore send errors (no subscribers is OK)
        let _ = self.tx.send(event);
    }

    /// Subscribe to receive events
    ///
    /// The receiver sees every event emitted after subscription.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        debug!("EventBus::subscribe: new subscriber");
        self.tx.subscribe()
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
