//! Response envelope shared by every API endpoint.
//!
//! All responses carry the same shape: a `success` flag, a human-readable
//! `message`, and (on success) an optional `data` payload. Handlers never
//! leak internal error detail; error messages come from the domain errors'
//! client-safe renderings.

use axum::{Json, http::StatusCode};
use serde::Serialize;

/// Body returned by successful requests.
///
/// `data` serializes as `null` when the operation has nothing to return
/// (funding, transfers, and withdrawals acknowledge with the message alone).
#[derive(Debug, Serialize)]
pub struct SuccessBody<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> SuccessBody<T> {
    /// Success with a data payload
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl SuccessBody<()> {
    /// Success with no data payload
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Body returned by failed requests
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

/// Error responses are a status code plus the error envelope
pub type ApiError = (StatusCode, Json<ErrorBody>);

/// Build an error response
pub fn error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            success: false,
            message: message.into(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_body_serializes_data() {
        let body = SuccessBody::new("user created successfully", 42);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "user created successfully");
        assert_eq!(json["data"], 42);
    }

    #[test]
    fn test_done_serializes_null_data() {
        let body = SuccessBody::done("wallet successfully funded");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_error_body_has_no_data() {
        let (status, Json(body)) = error(StatusCode::BAD_REQUEST, "amount must be at least 1");
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "amount must be at least 1");
        assert!(json.get("data").is_none());
    }
}
