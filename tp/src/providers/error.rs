//! Provider error types

use thiserror::Error;

/// Errors surfaced by the stop-lookup and planning collaborators
///
/// These pass through to the caller unmodified - the session never masks a
/// provider failure or converts it into a success-looking state.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
