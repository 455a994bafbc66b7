//! Wallet API handlers.
//!
//! This module provides HTTP REST endpoints for wallet operations:
//! - Funding the caller's wallet (created on first funding)
//! - Transferring funds to another user
//! - Withdrawing funds
//! - Reading wallet state, ledger history, and transaction history
//!
//! All endpoints require authentication via bearer token.
//!
//! # Examples
//!
//! Fund a wallet:
//! ```bash
//! curl -X POST http://localhost:3000/api/v1/wallet/fund \
//!   -H "Authorization: Bearer <user-id>" \
//!   -H "Content-Type: application/json" \
//!   -d '{"amount": 100.50}'
//! ```
//!
//! Transfer to another user:
//! ```bash
//! curl -X POST http://localhost:3000/api/v1/wallet/transfer \
//!   -H "Authorization: Bearer <user-id>" \
//!   -H "Content-Type: application/json" \
//!   -d '{"amount": 25, "receiverId": "7f1dd4a6-6a82-4dc1-9b2e-6a3cf4cf2f11"}'
//! ```

use axum::{
    Json,
    extract::{Extension, Query, State},
    http::StatusCode,
};
use credit_wallet::wallet::{Transaction, Wallet, WalletError, WalletLedgerEntry};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;
use super::middleware::AuthUser;
use super::response::{self, ApiError, SuccessBody};
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct FundWalletPayload {
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferFundPayload {
    pub amount: Decimal,
    pub receiver_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct WithdrawWalletPayload {
    pub amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// Fund the caller's wallet.
///
/// Creates the wallet on first funding. The credit is recorded as a `fund`
/// transaction with a credit ledger entry.
///
/// # Request Body
///
/// ```json
/// { "amount": 100.50 }
/// ```
///
/// # Response
///
/// On success, returns `200 OK`:
/// ```json
/// { "success": true, "message": "wallet successfully funded", "data": null }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Amount below 1 or with more than 2 decimal places
/// - `500 Internal Server Error`: Database failure
pub async fn fund_wallet(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<FundWalletPayload>,
) -> Result<Json<SuccessBody<()>>, ApiError> {
    validate_amount(payload.amount)?;

    match state.wallet_manager.fund(user_id, payload.amount).await {
        Ok(_wallet) => {
            metrics::wallet_operations_total("fund", "success");
            metrics::wallet_amount_moved("fund", payload.amount);
            Ok(Json(SuccessBody::done("wallet successfully funded")))
        }
        Err(e) => {
            metrics::wallet_operations_total("fund", "failure");
            Err(wallet_error_response(&e))
        }
    }
}

/// Transfer funds from the caller to another user.
///
/// Both parties must already hold wallets. The movement is atomic: the
/// sender's debit and the receiver's credit commit together or not at all.
///
/// # Request Body
///
/// ```json
/// { "amount": 25, "receiverId": "7f1dd4a6-6a82-4dc1-9b2e-6a3cf4cf2f11" }
/// ```
///
/// # Response
///
/// On success, returns `200 OK`:
/// ```json
/// { "success": true, "message": "fund successfully transferred", "data": null }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid amount, unknown counterparty, or insufficient balance
/// - `500 Internal Server Error`: Database failure
pub async fn transfer_fund(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<TransferFundPayload>,
) -> Result<Json<SuccessBody<()>>, ApiError> {
    validate_amount(payload.amount)?;

    match state
        .wallet_manager
        .transfer_funds(user_id, payload.receiver_id, payload.amount)
        .await
    {
        Ok(()) => {
            metrics::wallet_operations_total("transfer", "success");
            metrics::wallet_amount_moved("transfer", payload.amount);
            Ok(Json(SuccessBody::done("fund successfully transferred")))
        }
        Err(e) => {
            metrics::wallet_operations_total("transfer", "failure");
            Err(wallet_error_response(&e))
        }
    }
}

/// Withdraw funds from the caller's wallet.
///
/// The debit is recorded as a `withdraw` transaction with a debit ledger
/// entry. Unlike transfers, a missing wallet is reported as not found.
///
/// # Request Body
///
/// ```json
/// { "amount": 40 }
/// ```
///
/// # Response
///
/// On success, returns `200 OK`:
/// ```json
/// { "success": true, "message": "funds successfully withdrawn", "data": null }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Invalid amount or insufficient balance
/// - `404 Not Found`: Caller has no wallet
/// - `500 Internal Server Error`: Database failure
pub async fn withdraw_wallet(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Json(payload): Json<WithdrawWalletPayload>,
) -> Result<Json<SuccessBody<()>>, ApiError> {
    validate_amount(payload.amount)?;

    match state
        .wallet_manager
        .withdraw_funds(user_id, payload.amount)
        .await
    {
        Ok(_wallet) => {
            metrics::wallet_operations_total("withdraw", "success");
            metrics::wallet_amount_moved("withdraw", payload.amount);
            Ok(Json(SuccessBody::done("funds successfully withdrawn")))
        }
        Err(e) => {
            metrics::wallet_operations_total("withdraw", "failure");
            Err(wallet_error_response(&e))
        }
    }
}

/// Get the caller's wallet.
///
/// # Response
///
/// Returns `200 OK` with balances:
/// ```json
/// {
///   "success": true,
///   "message": "wallet retrieved successfully",
///   "data": {
///     "id": "0b9dbd75-8e4d-49e8-bd9f-0d8df6cf25d8",
///     "user_id": "7f1dd4a6-6a82-4dc1-9b2e-6a3cf4cf2f11",
///     "ledger_balance": "400.00",
///     "available_balance": "400.00",
///     "created_at": "2025-11-22T10:30:00Z",
///     "updated_at": "2025-11-22T10:31:00Z"
///   }
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: Caller has no wallet yet
pub async fn get_wallet(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<SuccessBody<Wallet>>, ApiError> {
    match state.wallet_manager.get_wallet(user_id).await {
        Ok(wallet) => Ok(Json(SuccessBody::new(
            "wallet retrieved successfully",
            wallet,
        ))),
        Err(e) => Err(wallet_error_response(&e)),
    }
}

/// Get the caller's ledger history, newest first.
///
/// # Query Parameters
///
/// - `limit`: Maximum number of entries (default 50, capped at 500)
///
/// # Errors
///
/// - `500 Internal Server Error`: Database failure
pub async fn get_ledger(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<SuccessBody<Vec<WalletLedgerEntry>>>, ApiError> {
    match state
        .wallet_manager
        .get_ledger_entries(user_id, query.limit)
        .await
    {
        Ok(entries) => Ok(Json(SuccessBody::new(
            "wallet ledger retrieved successfully",
            entries,
        ))),
        Err(e) => Err(wallet_error_response(&e)),
    }
}

/// Get the caller's transaction history, newest first.
///
/// # Query Parameters
///
/// - `limit`: Maximum number of transactions (default 50, capped at 500)
///
/// # Errors
///
/// - `500 Internal Server Error`: Database failure
pub async fn get_transactions(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<SuccessBody<Vec<Transaction>>>, ApiError> {
    match state
        .wallet_manager
        .get_transactions(user_id, query.limit)
        .await
    {
        Ok(transactions) => Ok(Json(SuccessBody::new(
            "transactions retrieved successfully",
            transactions,
        ))),
        Err(e) => Err(wallet_error_response(&e)),
    }
}

/// Validate a monetary amount at the API boundary.
///
/// Amounts must be at least 1 and carry at most 2 decimal places; finer
/// precision would be silently rounded by the currency columns.
fn validate_amount(amount: Decimal) -> Result<(), ApiError> {
    if amount < Decimal::ONE {
        return Err(response::error(
            StatusCode::BAD_REQUEST,
            "amount must be at least 1",
        ));
    }

    if amount.normalize().scale() > 2 {
        return Err(response::error(
            StatusCode::BAD_REQUEST,
            "amount cannot have more than 2 decimal places",
        ));
    }

    Ok(())
}

/// Map a wallet error onto its HTTP status and client-safe message
fn wallet_error_response(error: &WalletError) -> ApiError {
    let status = match error {
        WalletError::InvalidAmount(_)
        | WalletError::InvalidCounterparty
        | WalletError::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
        WalletError::WalletNotFound(_) => StatusCode::NOT_FOUND,
        WalletError::Database(_) | WalletError::TransactionFailed(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %error, "wallet operation failed");
    }

    response::error(status, error.client_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_amount_accepts_whole_and_cents() {
        assert!(validate_amount(dec!(1)).is_ok());
        assert!(validate_amount(dec!(1.00)).is_ok());
        assert!(validate_amount(dec!(250.75)).is_ok());
        assert!(validate_amount(dec!(10.50)).is_ok());
    }

    #[test]
    fn test_validate_amount_rejects_below_one() {
        assert!(validate_amount(dec!(0)).is_err());
        assert!(validate_amount(dec!(0.99)).is_err());
        assert!(validate_amount(dec!(-5)).is_err());
    }

    #[test]
    fn test_validate_amount_rejects_sub_cent_precision() {
        assert!(validate_amount(dec!(1.001)).is_err());
        assert!(validate_amount(dec!(99.999)).is_err());
        // Trailing zeros are not extra precision
        assert!(validate_amount(dec!(5.100)).is_ok());
    }

    #[test]
    fn test_insufficient_balance_maps_to_bad_request() {
        let err = WalletError::InsufficientBalance {
            available: dec!(50.00),
            required: dec!(100.00),
        };
        let (status, Json(body)) = wallet_error_response(&err);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.message.contains("Insufficient"));
    }

    #[test]
    fn test_missing_wallet_maps_to_not_found() {
        let err = WalletError::WalletNotFound(Uuid::new_v4());
        let (status, Json(body)) = wallet_error_response(&err);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Wallet not found");
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err = WalletError::TransactionFailed("wallet vanished".to_string());
        let (status, Json(body)) = wallet_error_response(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
    }

    #[test]
    fn test_transfer_payload_uses_camel_case() {
        let payload: TransferFundPayload = serde_json::from_str(
            r#"{"amount": 25, "receiverId": "7f1dd4a6-6a82-4dc1-9b2e-6a3cf4cf2f11"}"#,
        )
        .unwrap();
        assert_eq!(payload.amount, dec!(25));
    }
}
