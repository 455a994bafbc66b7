//! Failure modes for wallet operations.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by wallet operations and their storage layer
#[derive(Debug, Error)]
pub enum WalletError {
    /// Underlying storage failure
    #[error("Storage error: {0}")]
    Database(#[from] sqlx::Error),

    /// Amount is zero or negative
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Decimal),

    /// Transfer party missing a wallet
    #[error("Invalid sender or receiver")]
    InvalidCounterparty,

    #[error("Insufficient available balance: available {available}, required {required}")]
    InsufficientBalance {
        available: Decimal,
        required: Decimal,
    },

    #[error("No wallet exists for user {0}")]
    WalletNotFound(Uuid),

    /// The unit of work could not complete
    #[error("Wallet transaction failed: {0}")]
    TransactionFailed(String),
}

impl WalletError {
    /// Message safe to return to API callers.
    ///
    /// Storage failures collapse to a generic message and user ids are
    /// redacted; validation detail passes through verbatim.
    pub fn client_message(&self) -> String {
        match self {
            WalletError::Database(_) | WalletError::TransactionFailed(_) => {
                "Internal server error".to_string()
            }
            WalletError::WalletNotFound(_) => "Wallet not found".to_string(),
            _ => self.to_string(),
        }
    }

    /// Whether the error is the caller's fault (a validation failure) rather
    /// than a missing wallet or a storage fault.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WalletError::InvalidAmount(_)
                | WalletError::InvalidCounterparty
                | WalletError::InsufficientBalance { .. }
        )
    }
}

/// Shorthand for results carrying [`WalletError`].
pub type WalletResult<T> = Result<T, WalletError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_client_message_sanitizes_internals() {
        let err = WalletError::Database(sqlx::Error::PoolClosed);
        assert_eq!(err.client_message(), "Internal server error");

        let err = WalletError::WalletNotFound(Uuid::new_v4());
        assert_eq!(err.client_message(), "Wallet not found");

        let err = WalletError::TransactionFailed("wallet row vanished".to_string());
        assert_eq!(err.client_message(), "Internal server error");
    }

    #[test]
    fn test_client_message_keeps_validation_detail() {
        let err = WalletError::InsufficientBalance {
            available: dec!(10.00),
            required: dec!(25.50),
        };
        assert_eq!(
            err.client_message(),
            "Insufficient available balance: available 10.00, required 25.50"
        );
        assert!(err.is_validation());

        let err = WalletError::InvalidCounterparty;
        assert_eq!(err.client_message(), "Invalid sender or receiver");
        assert!(err.is_validation());
    }
}
