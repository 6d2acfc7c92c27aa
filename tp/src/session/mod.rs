//! Selection state and plan coordination
//!
//! The session actor owns all user selections, re-triggers plan computation
//! on every selection change, and applies completed plans to the derived
//! state (plan text, map URI, center).

mod core;
mod handle;
mod messages;

pub use self::core::{SelectionSnapshot, Session};
pub use handle::SessionHandle;
pub use messages::{SessionCommand, SessionError, SessionResponse};
