//! Wallet module providing per-user balances with an immutable ledger.
//!
//! This module implements:
//! - Lazy wallet creation on first funding (one wallet per user)
//! - Funding, peer-to-peer transfer, and withdrawal as atomic units of work
//! - An append-only ledger row per balance mutation, with before/after
//!   balance snapshots taken under row locks
//! - Relative, server-side balance updates (no lost updates under races)
//! - Deterministic lock ordering for transfers (no deadlocks)
//!
//! ## Example
//!
//! ```no_run
//! use credit_wallet::db::Database;
//! use credit_wallet::wallet::WalletManager;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let wallets = WalletManager::new(Arc::new(db.pool().clone()));
//!
//!     let user_id = Uuid::new_v4();
//!     let wallet = wallets.fund(user_id, Decimal::new(100_00, 2)).await?;
//!     println!("Balance after funding: {}", wallet.ledger_balance);
//!
//!     let history = wallets.get_ledger_entries(user_id, None).await?;
//!     println!("Ledger entries: {}", history.len());
//!
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ledger;
pub mod manager;
pub mod models;
pub mod store;

pub use errors::{WalletError, WalletResult};
pub use ledger::build_entry;
pub use manager::{DEFAULT_LEDGER_LIMIT, MAX_LEDGER_LIMIT, WalletManager};
pub use models::{
    EntryDirection, EntryStatus, Transaction, TransactionId, TransactionKind, UserId, Wallet,
    WalletId, WalletLedgerEntry,
};
pub use store::{TransactionRecorder, WalletStore};
