//! HTTP API for the wallet server.
//!
//! This module provides the complete REST API for account creation and
//! wallet operations. Every money movement goes through the wallet manager,
//! which records it atomically in the append-only wallet ledger.
//!
//! # Architecture
//!
//! Built on:
//! - **Axum**: Async web framework
//! - **Tower**: Middleware for CORS and request correlation
//! - **Bearer identification**: The Authorization header carries the caller's user ID
//!
//! # Modules
//!
//! - [`auth`]: Account creation with email blacklist screening
//! - [`wallet`]: Funding, transfers, withdrawals, and history reads
//! - [`middleware`]: Bearer token verification for wallet routes
//! - [`request_id`]: Request correlation and HTTP metrics
//! - [`response`]: The shared success/error response envelope
//!
//! # Endpoints Overview
//!
//! ## Account (No Auth Required)
//! - `POST /api/v1/auth/signup` - Create user account
//!
//! ## Wallet (Auth Required)
//! - `POST /api/v1/wallet/fund` - Fund own wallet
//! - `POST /api/v1/wallet/transfer` - Transfer to another user
//! - `POST /api/v1/wallet/withdraw` - Withdraw funds
//! - `GET  /api/v1/wallet` - Current balances
//! - `GET  /api/v1/wallet/ledger` - Ledger history
//! - `GET  /api/v1/wallet/transactions` - Transaction history
//!
//! ## Health Check
//! - `GET /` - Liveness ("server up")
//! - `GET /health` - Server health status with database connectivity
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use cw_server::api::{create_router, AppState};
//! use std::sync::Arc;
//! # use credit_wallet::user::UserManager;
//! # use credit_wallet::wallet::WalletManager;
//! # use sqlx::PgPool;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let user_manager: UserManager = unimplemented!();
//! # let wallet_manager: WalletManager = unimplemented!();
//! # let pool: PgPool = unimplemented!();
//!
//! // Shared state handed to every handler
//! let state = AppState {
//!     user_manager: Arc::new(user_manager),
//!     wallet_manager: Arc::new(wallet_manager),
//!     pool: Arc::new(pool),
//! };
//!
//! // Assemble the router
//! let app = create_router(state);
//!
//! // Serve
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is left permissive for development; tighten origins and methods
//! before exposing this publicly.

pub mod auth;
pub mod middleware;
pub mod request_id;
pub mod response;
pub mod wallet;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use credit_wallet::{user::UserManager, wallet::WalletManager};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use response::SuccessBody;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request (cheap due to Arc wrappers) and
/// provides access to the core system managers.
///
/// # Fields
///
/// - `user_manager`: Handles account creation and user lookup
/// - `wallet_manager`: Handles balances, transfers, and the ledger
/// - `pool`: Database connection pool for health checks
#[derive(Clone)]
pub struct AppState {
    pub user_manager: Arc<UserManager>,
    pub wallet_manager: Arc<WalletManager>,
    pub pool: Arc<PgPool>,
}

/// Build the full application router.
///
/// Wires up the account and wallet endpoints and applies request correlation
/// and CORS middleware to every route.
///
/// # Arguments
///
/// - `state`: Shared managers and pool handed to every handler
///
/// # Returns
///
/// The assembled router, ready for `axum::serve`
///
/// # Endpoint Summary
///
/// ## API v1 (Recommended)
/// ```text
/// GET  /                               - Liveness check (public)
/// GET  /health                         - Readiness check (public)
/// POST /api/v1/auth/signup             - Create account (public)
/// POST /api/v1/wallet/fund             - Fund wallet (auth required)
/// POST /api/v1/wallet/transfer         - Transfer funds (auth required)
/// POST /api/v1/wallet/withdraw         - Withdraw funds (auth required)
/// GET  /api/v1/wallet                  - Wallet balances (auth required)
/// GET  /api/v1/wallet/ledger           - Ledger history (auth required)
/// GET  /api/v1/wallet/transactions     - Transaction history (auth required)
/// ```
///
/// ## Legacy Routes (Deprecated)
/// ```text
/// POST /auth/signup                    - Use /api/v1/auth/signup
/// POST /wallet/fund                    - Use /api/v1/wallet/fund
/// POST /wallet/transfer                - Use /api/v1/wallet/transfer
/// POST /wallet/withdraw                - Use /api/v1/wallet/withdraw
/// ```
///
/// # Example
///
/// ```rust,no_run
/// # use cw_server::api::{create_router, AppState};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let state: AppState = unimplemented!();
/// let app = create_router(state);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    let v1_routes = create_v1_router(state.clone());

    // Legacy unversioned routes retained for existing clients
    let legacy_routes = create_legacy_router(state.clone());

    // Root routes (liveness, health check - not versioned)
    let root_routes = Router::new()
        .route("/", get(server_up))
        .route("/health", get(health_check));

    Router::new()
        .merge(root_routes)
        .nest("/api/v1", v1_routes)
        .merge(legacy_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Assemble the `/api/v1` route set.
///
/// Versioning the prefix leaves room for a v2 without breaking existing
/// callers.
fn create_v1_router(state: AppState) -> Router<AppState> {
    // Sign-up stays public; everything under /wallet requires a bearer token
    let public_routes = Router::new().route("/auth/signup", post(auth::signup));

    let protected_routes = Router::new()
        .route("/wallet/fund", post(wallet::fund_wallet))
        .route("/wallet/transfer", post(wallet::transfer_fund))
        .route("/wallet/withdraw", post(wallet::withdraw_wallet))
        .route("/wallet", get(wallet::get_wallet))
        .route("/wallet/ledger", get(wallet::get_ledger))
        .route("/wallet/transactions", get(wallet::get_transactions))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::bearer_auth,
        ));

    Router::new().merge(public_routes).merge(protected_routes)
}

/// Create the legacy unversioned router matching the original route layout
fn create_legacy_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new().route("/auth/signup", post(auth::signup));

    let protected_routes = Router::new()
        .route("/wallet/fund", post(wallet::fund_wallet))
        .route("/wallet/transfer", post(wallet::transfer_fund))
        .route("/wallet/withdraw", post(wallet::withdraw_wallet))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::bearer_auth,
        ));

    Router::new().merge(public_routes).merge(protected_routes)
}

/// Liveness endpoint.
///
/// Always returns `200 OK` once the server is accepting connections.
///
/// # Example
///
/// ```bash
/// curl http://localhost:3000/
/// # {"success":true,"message":"server up","data":null}
/// ```
async fn server_up() -> Json<SuccessBody<()>> {
    Json(SuccessBody::done("server up"))
}

/// Readiness endpoint for monitors and load balancers.
///
/// Round-trips a trivial query to confirm database connectivity and reports
/// the result as JSON.
///
/// # Response
///
/// `200 OK` while the database is reachable, `503 Service Unavailable`
/// otherwise.
///
/// # Example
///
/// ```bash
/// curl http://localhost:3000/health
/// # {"status":"healthy","version":"0.1.0","database":true,"timestamp":"2025-11-22T10:30:00Z"}
/// ```
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_healthy = sqlx::query("SELECT 1")
        .fetch_one(&*state.pool)
        .await
        .is_ok();

    let status_code = if db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = json!({
        "status": if db_healthy { "healthy" } else { "unhealthy" },
        "version": env!("CARGO_PKG_VERSION"),
        "database": db_healthy,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (status_code, Json(response))
}
