//! Failure modes for account operations.

use crate::screening::ScreeningError;
use thiserror::Error;

/// Errors surfaced during registration and lookup
#[derive(Debug, Error)]
pub enum UserError {
    /// Underlying storage failure
    #[error("Storage error: {0}")]
    Database(#[from] sqlx::Error),

    /// Email already registered
    #[error("User already exists")]
    AlreadyExists,

    /// Email flagged by the blacklist provider
    #[error("user email is blacklisted")]
    EmailBlacklisted,

    /// Blacklist verdict could not be obtained; signup is refused
    #[error("Screening unavailable: {0}")]
    ScreeningUnavailable(#[from] ScreeningError),

    /// Name or email failed validation
    #[error("Invalid user details: {0}")]
    InvalidDetails(String),
}

impl UserError {
    /// Message safe to return to API callers.
    pub fn client_message(&self) -> String {
        match self {
            UserError::Database(_) => "Internal server error".to_string(),
            // The caller learns signup was refused, not why the provider
            // could not answer
            UserError::ScreeningUnavailable(_) => {
                "Unable to verify email at this time".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Shorthand for results carrying [`UserError`].
pub type UserResult<T> = Result<T, UserError>;
