//! Wallet data models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// User ID type
pub type UserId = Uuid;

/// Wallet ID type
pub type WalletId = Uuid;

/// Transaction ID type
pub type TransactionId = Uuid;

/// Wallet model
///
/// `ledger_balance` is the settled balance; `available_balance` is what the
/// owner may spend right now. The two move in lockstep until a holds feature
/// gives them a reason to diverge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,
    pub user_id: UserId,
    pub ledger_balance: Decimal,
    pub available_balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Transaction model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub wallet_id: WalletId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub status: EntryStatus,
    pub created_at: DateTime<Utc>,
}

/// Wallet ledger entry model (immutable audit row)
///
/// Every balance mutation writes exactly one of these, carrying the balance
/// as it stood before the mutation and as it stood after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletLedgerEntry {
    pub id: Uuid,
    pub user_id: UserId,
    pub wallet_id: WalletId,
    pub transaction_id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub direction: EntryDirection,
    pub amount: Decimal,
    pub previous_balance: Decimal,
    pub new_balance: Decimal,
    pub status: EntryStatus,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Transaction kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Fund,
    Transfer,
    Withdraw,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Fund => write!(f, "fund"),
            TransactionKind::Transfer => write!(f, "transfer"),
            TransactionKind::Withdraw => write!(f, "withdraw"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fund" => Ok(TransactionKind::Fund),
            "transfer" => Ok(TransactionKind::Transfer),
            "withdraw" => Ok(TransactionKind::Withdraw),
            other => Err(format!("unknown transaction kind: {other}")),
        }
    }
}

/// Entry direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryDirection {
    Credit,
    Debit,
}

impl std::fmt::Display for EntryDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryDirection::Credit => write!(f, "credit"),
            EntryDirection::Debit => write!(f, "debit"),
        }
    }
}

impl FromStr for EntryDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit" => Ok(EntryDirection::Credit),
            "debit" => Ok(EntryDirection::Debit),
            other => Err(format!("unknown entry direction: {other}")),
        }
    }
}

/// Entry status
///
/// Every row this service writes today is `Completed`; `Pending` and
/// `Failed` are schema vocabulary reserved for settlement flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    Pending,
    Completed,
    Failed,
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Pending => write!(f, "pending"),
            EntryStatus::Completed => write!(f, "completed"),
            EntryStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(EntryStatus::Pending),
            "completed" => Ok(EntryStatus::Completed),
            "failed" => Ok(EntryStatus::Failed),
            other => Err(format!("unknown entry status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_display_round_trips() {
        for kind in [
            TransactionKind::Fund,
            TransactionKind::Transfer,
            TransactionKind::Withdraw,
        ] {
            assert_eq!(kind.to_string().parse::<TransactionKind>(), Ok(kind));
        }
        for direction in [EntryDirection::Credit, EntryDirection::Debit] {
            assert_eq!(direction.to_string().parse::<EntryDirection>(), Ok(direction));
        }
        for status in [
            EntryStatus::Pending,
            EntryStatus::Completed,
            EntryStatus::Failed,
        ] {
            assert_eq!(status.to_string().parse::<EntryStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_unknown_enum_values_are_rejected() {
        assert!("deposit".parse::<TransactionKind>().is_err());
        assert!("both".parse::<EntryDirection>().is_err());
        assert!("settled".parse::<EntryStatus>().is_err());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_value(TransactionKind::Withdraw).unwrap();
        assert_eq!(json, serde_json::json!("withdraw"));
    }
}
