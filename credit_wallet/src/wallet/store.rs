//! Storage gateways for wallets, transactions, and ledger rows.
//!
//! Every mutating method takes the caller's open database transaction so a
//! whole wallet operation commits or rolls back as one unit of work. Balance
//! writes are relative (`ledger_balance + $1`); nothing here ever writes an
//! absolute balance computed in application code.

use super::{
    errors::{WalletError, WalletResult},
    models::{self, TransactionId, TransactionKind, UserId, Wallet, WalletId, WalletLedgerEntry},
};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

const WALLET_COLUMNS: &str =
    "id, user_id, ledger_balance, available_balance, created_at, updated_at";

pub(crate) fn wallet_from_row(row: &PgRow) -> Wallet {
    Wallet {
        id: row.get("id"),
        user_id: row.get("user_id"),
        ledger_balance: row.get("ledger_balance"),
        available_balance: row.get("available_balance"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub(crate) fn transaction_from_row(row: &PgRow) -> WalletResult<models::Transaction> {
    Ok(models::Transaction {
        id: row.get("id"),
        user_id: row.get("user_id"),
        wallet_id: row.get("wallet_id"),
        kind: row
            .get::<String, _>("type")
            .parse()
            .map_err(WalletError::TransactionFailed)?,
        amount: row.get("amount"),
        status: row
            .get::<String, _>("status")
            .parse()
            .map_err(WalletError::TransactionFailed)?,
        created_at: row.get("created_at"),
    })
}

pub(crate) fn entry_from_row(row: &PgRow) -> WalletResult<WalletLedgerEntry> {
    Ok(WalletLedgerEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        wallet_id: row.get("wallet_id"),
        transaction_id: row.get("transaction_id"),
        kind: row
            .get::<String, _>("type")
            .parse()
            .map_err(WalletError::TransactionFailed)?,
        direction: row
            .get::<String, _>("direction")
            .parse()
            .map_err(WalletError::TransactionFailed)?,
        amount: row.get("amount"),
        previous_balance: row.get("previous_balance"),
        new_balance: row.get("new_balance"),
        status: row
            .get::<String, _>("status")
            .parse()
            .map_err(WalletError::TransactionFailed)?,
        description: row.get("description"),
        created_at: row.get("created_at"),
    })
}

/// Gateway for the `wallets` table.
#[derive(Debug, Clone, Default)]
pub struct WalletStore;

impl WalletStore {
    pub fn new() -> Self {
        Self
    }

    /// Fetch a wallet by owner without locking it.
    pub async fn get(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
    ) -> WalletResult<Option<Wallet>> {
        let row = sqlx::query(&format!(
            "SELECT {WALLET_COLUMNS} FROM wallets WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.as_ref().map(wallet_from_row))
    }

    /// Fetch a wallet by owner and lock its row for the rest of the
    /// transaction.
    ///
    /// The lock serializes concurrent operations on the same wallet, so the
    /// returned balances are stable until commit and safe to use as ledger
    /// snapshots.
    ///
    /// # Arguments
    ///
    /// * `tx` - Open database transaction
    /// * `user_id` - Wallet owner
    ///
    /// # Returns
    ///
    /// * `WalletResult<Option<Wallet>>` - The locked wallet, if one exists
    pub async fn get_for_update(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
    ) -> WalletResult<Option<Wallet>> {
        let row = sqlx::query(&format!(
            "SELECT {WALLET_COLUMNS} FROM wallets WHERE user_id = $1 FOR UPDATE"
        ))
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.as_ref().map(wallet_from_row))
    }

    /// Lock a wallet row by primary key.
    ///
    /// Transfers lock both wallets with this, always in ascending wallet-id
    /// order so two opposing transfers cannot deadlock.
    pub async fn lock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: WalletId,
    ) -> WalletResult<Option<Wallet>> {
        let row = sqlx::query(&format!(
            "SELECT {WALLET_COLUMNS} FROM wallets WHERE id = $1 FOR UPDATE"
        ))
        .bind(wallet_id)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(row.as_ref().map(wallet_from_row))
    }

    /// Create a zero-balance wallet for a user unless one already exists.
    ///
    /// Relies on the unique constraint on `wallets.user_id`: when two
    /// first-funding requests race, one insert wins and the other becomes a
    /// no-op, so the caller re-selects (and locks) the surviving row instead
    /// of treating the conflict as an error.
    ///
    /// # Arguments
    ///
    /// * `tx` - Open database transaction
    /// * `user_id` - Wallet owner
    pub async fn create(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
    ) -> WalletResult<()> {
        sqlx::query(
            "INSERT INTO wallets (id, user_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }

    /// Apply a relative balance adjustment and return the updated wallet.
    ///
    /// Credits pass a positive delta, debits a negative one. Both balance
    /// columns move together; the database computes the result, so two
    /// committed adjustments can never lose an update.
    ///
    /// # Arguments
    ///
    /// * `tx` - Open database transaction
    /// * `wallet_id` - Wallet to adjust
    /// * `delta` - Signed amount to add to both balances
    ///
    /// # Returns
    ///
    /// * `WalletResult<Wallet>` - The wallet as persisted after the update
    pub async fn adjust_balance(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: WalletId,
        delta: Decimal,
    ) -> WalletResult<Wallet> {
        let row = sqlx::query(&format!(
            "UPDATE wallets
             SET ledger_balance = ledger_balance + $1,
                 available_balance = available_balance + $1,
                 updated_at = NOW()
             WHERE id = $2
             RETURNING {WALLET_COLUMNS}"
        ))
        .bind(delta)
        .bind(wallet_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| {
            WalletError::TransactionFailed(format!(
                "wallet {wallet_id} vanished during balance adjustment"
            ))
        })?;

        Ok(wallet_from_row(&row))
    }
}

/// Gateway for the `transactions` and `wallet_ledger` tables.
#[derive(Debug, Clone, Default)]
pub struct TransactionRecorder;

impl TransactionRecorder {
    pub fn new() -> Self {
        Self
    }

    /// Insert a transaction row and return its generated id.
    ///
    /// Every transaction this service records is written `completed`; there
    /// is no multi-phase settlement.
    ///
    /// # Arguments
    ///
    /// * `tx` - Open database transaction
    /// * `wallet_id` - Wallet the money moved through
    /// * `user_id` - User the movement belongs to
    /// * `kind` - Operation kind (`fund`, `transfer`, `withdraw`)
    /// * `amount` - Positive amount moved
    ///
    /// # Returns
    ///
    /// * `WalletResult<TransactionId>` - Id of the inserted row
    pub async fn record_transaction(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: WalletId,
        user_id: UserId,
        kind: TransactionKind,
        amount: Decimal,
    ) -> WalletResult<TransactionId> {
        let row = sqlx::query(
            r#"
            INSERT INTO transactions (id, user_id, wallet_id, type, amount, status)
            VALUES ($1, $2, $3, $4, $5, 'completed')
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(wallet_id)
        .bind(kind.to_string())
        .bind(amount)
        .fetch_one(&mut **tx)
        .await?;

        Ok(row.get("id"))
    }

    /// Insert a ledger entry exactly as built.
    ///
    /// Ledger rows are append-only; no update or delete path exists.
    pub async fn record_ledger_entry(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        entry: &WalletLedgerEntry,
    ) -> WalletResult<()> {
        sqlx::query(
            r#"
            INSERT INTO wallet_ledger
                (id, user_id, wallet_id, transaction_id, type, direction, amount,
                 previous_balance, new_balance, status, description, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(entry.wallet_id)
        .bind(entry.transaction_id)
        .bind(entry.kind.to_string())
        .bind(entry.direction.to_string())
        .bind(entry.amount)
        .bind(entry.previous_balance)
        .bind(entry.new_balance)
        .bind(entry.status.to_string())
        .bind(entry.description.as_deref())
        .bind(entry.created_at)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}
