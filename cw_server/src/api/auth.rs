//! Account creation API handler.
//!
//! Sign-up creates a user record after the email passes blacklist screening.
//! Screened-out and duplicate emails are rejected; the created user is
//! returned on success so clients can pick up their identifier.
//!
//! # Examples
//!
//! Create an account:
//! ```bash
//! curl -X POST http://localhost:3000/api/v1/auth/signup \
//!   -H "Content-Type: application/json" \
//!   -d '{"name": "Ada Lovelace", "email": "ada@example.com"}'
//! ```

use axum::{Json, extract::State, http::StatusCode};
use credit_wallet::user::{CreateUserRequest, User, UserError};
use serde::Deserialize;

use super::AppState;
use super::response::{self, ApiError, SuccessBody};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct SignupPayload {
    pub name: String,
    pub email: String,
}

/// Create a new user account.
///
/// The email is screened against the blacklist provider before the account
/// is created. Registration is refused when the screening verdict is
/// negative or cannot be obtained.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com"
/// }
/// ```
///
/// # Response
///
/// On success, returns `201 Created` with the new user:
/// ```json
/// {
///   "success": true,
///   "message": "user created successfully",
///   "data": {
///     "id": "7f1dd4a6-6a82-4dc1-9b2e-6a3cf4cf2f11",
///     "name": "Ada Lovelace",
///     "email": "ada@example.com",
///     "created_at": "2025-11-22T10:30:00Z",
///     "updated_at": "2025-11-22T10:30:00Z"
///   }
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Blacklisted email, duplicate email, or invalid input
/// - `500 Internal Server Error`: Database failure
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<(StatusCode, Json<SuccessBody<User>>), ApiError> {
    let request = CreateUserRequest {
        name: payload.name,
        email: payload.email,
    };

    match state.user_manager.register(request).await {
        Ok(user) => {
            metrics::signups_total("success");
            Ok((
                StatusCode::CREATED,
                Json(SuccessBody::new("user created successfully", user)),
            ))
        }
        Err(e) => {
            metrics::signups_total(signup_outcome(&e));
            Err(user_error_response(&e))
        }
    }
}

/// Map a user error onto its HTTP status and client-safe message
fn user_error_response(error: &UserError) -> ApiError {
    let status = match error {
        UserError::AlreadyExists
        | UserError::EmailBlacklisted
        | UserError::ScreeningUnavailable(_)
        | UserError::InvalidDetails(_) => StatusCode::BAD_REQUEST,
        UserError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %error, "signup failed");
    }

    response::error(status, error.client_message())
}

fn signup_outcome(error: &UserError) -> &'static str {
    match error {
        UserError::EmailBlacklisted => "blacklisted",
        UserError::AlreadyExists | UserError::InvalidDetails(_) => "rejected",
        UserError::ScreeningUnavailable(_) | UserError::Database(_) => "failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blacklisted_email_maps_to_bad_request() {
        let (status, Json(body)) = user_error_response(&UserError::EmailBlacklisted);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "user email is blacklisted");
    }

    #[test]
    fn test_duplicate_email_maps_to_bad_request() {
        let (status, Json(body)) = user_error_response(&UserError::AlreadyExists);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "User already exists");
    }

    #[test]
    fn test_database_error_is_masked() {
        let err = UserError::Database(sqlx::Error::PoolClosed);
        let (status, Json(body)) = user_error_response(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
    }
}
