//! Screening error types.

use thiserror::Error;

/// Screening errors
#[derive(Debug, Error)]
pub enum ScreeningError {
    /// Transport-level failure talking to the provider
    #[error("Screening request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success envelope or HTTP status
    #[error("Screening provider error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Provider answered 2xx but the body was not usable
    #[error("Malformed screening response: {0}")]
    MalformedResponse(String),
}

/// Result type for screening operations
pub type ScreeningResult<T> = Result<T, ScreeningError>;
