//! # Credit Wallet
//!
//! A per-user monetary wallet library with an immutable ledger.
//!
//! The library supports three money movements: funding a wallet, transferring
//! between two users, and withdrawing. Every movement runs as one database
//! transaction that records an audit trail alongside the balance change:
//!
//! - a `transactions` row describing the movement,
//! - an append-only `wallet_ledger` row per affected wallet, carrying the
//!   balance before and after the movement,
//! - and a relative update of the wallet's balances.
//!
//! Balance snapshots are read under row locks inside the same transaction, so
//! consecutive ledger entries for a wallet always chain, and balances are
//! only ever moved by server-side relative updates.
//!
//! ## Core Modules
//!
//! - [`wallet`]: Wallet engine, storage gateways, ledger construction
//! - [`user`]: Registration (with blacklist screening) and lookups
//! - [`screening`]: Blacklist provider trait and Adjutor client
//! - [`db`]: Connection pooling, configuration, embedded migrations
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
//!     db.run_migrations().await?;
//!
//!     let wallets = WalletManager::new(Arc::new(db.pool().clone()));
//!     let alice = Uuid::new_v4();
//!     let bob = Uuid::new_v4();
//!
//!     wallets.fund(alice, Decimal::new(500_00, 2)).await?;
//!     wallets.fund(bob, Decimal::new(200_00, 2)).await?;
//!     wallets.transfer_funds(alice, bob, Decimal::new(100_00, 2)).await?;
//!
//!     Ok(())
//! }
//! ```

/// Database pooling, configuration, and migrations.
pub mod db;
pub use db::{Database, DatabaseConfig};

/// Blacklist screening provider integration.
pub mod screening;
pub use screening::{AdjutorClient, KarmaReport, Screener, ScreeningError};

/// User registration and lookups.
pub mod user;
pub use user::{CreateUserRequest, User, UserError, UserManager};

/// Wallet engine, stores, and ledger.
pub mod wallet;
pub use wallet::{
    EntryDirection, EntryStatus, TransactionKind, Wallet, WalletError, WalletLedgerEntry,
    WalletManager,
};
