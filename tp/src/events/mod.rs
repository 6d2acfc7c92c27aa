//! Change notification channel
//!
//! Publishes field-identified change events for SourceStops, TargetStops,
//! Times, Plan, and MapUri.

mod bus;
mod types;

pub use bus::{DEFAULT_CHANNEL_CAPACITY, EventBus};
pub use types::SessionEvent;
