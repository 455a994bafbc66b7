//! Bearer authentication for protected endpoints.
//!
//! The Authorization header carries the caller's user identifier as a bearer
//! token. The middleware parses it, confirms the user exists, and injects an
//! [`AuthUser`] into request extensions for downstream handlers.
//!
//! # Usage
//!
//! Layered onto protected route groups:
//!
//! ```rust,no_run
//! use axum::{Router, middleware::from_fn_with_state, routing::post};
//! # use cw_server::api::middleware::bearer_auth;
//! # use cw_server::api::AppState;
//! # async fn fund() {}
//! # let state: AppState = unimplemented!();
//!
//! let wallet_routes: Router = Router::new()
//!     .route("/wallet/fund", post(fund))
//!     .layer(from_fn_with_state(state.clone(), bearer_auth));
//! # let _ = wallet_routes;
//! ```
//!
//! # Extracting the caller
//!
//! In handler functions, extract the authenticated user from request extensions:
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use cw_server::api::middleware::AuthUser;
//!
//! async fn protected_handler(Extension(AuthUser(user_id)): Extension<AuthUser>) -> String {
//!     format!("Authenticated as user {user_id}")
//! }
//! # let _ = protected_handler;
//! ```

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use credit_wallet::wallet::UserId;
use uuid::Uuid;

use super::{AppState, response};

/// Authenticated caller injected into request extensions
#[derive(Clone, Copy, Debug)]
pub struct AuthUser(pub UserId);

/// Authentication middleware that resolves the bearer token to a known user.
///
/// Expects:
/// ```text
/// Authorization: Bearer <user-id>
/// ```
///
/// # Behavior
///
/// - **Success**: User exists → injects [`AuthUser`] into extensions → calls next handler
/// - **Missing or non-bearer header**: `401 Unauthorized`
/// - **Empty or malformed identifier**: `401 Unauthorized`
/// - **Unknown user**: `401 Unauthorized`
pub async fn bearer_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, response::ApiError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match auth_header {
        Some(t) => t.trim(),
        None => {
            return Err(response::error(
                StatusCode::UNAUTHORIZED,
                "Unauthorized. Missing or invalid token.",
            ));
        }
    };

    if token.is_empty() {
        return Err(response::error(
            StatusCode::UNAUTHORIZED,
            "Invalid token format.",
        ));
    }

    let user_id = Uuid::parse_str(token).map_err(|_| {
        response::error(StatusCode::UNAUTHORIZED, "Invalid token format.")
    })?;

    match state.user_manager.find_user(user_id).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(AuthUser(user.id));
            Ok(next.run(request).await)
        }
        Ok(None) => Err(response::error(
            StatusCode::UNAUTHORIZED,
            "Auth token is invalid, please re-login.",
        )),
        Err(e) => {
            tracing::error!(error = %e, "auth lookup failed");
            Err(response::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
            ))
        }
    }
}
