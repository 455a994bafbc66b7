//! Wallet engine: funding, transfers, and withdrawals as single units of work.
//!
//! Each operation opens one database transaction, locks the wallet rows it
//! will touch, snapshots balances for the ledger, applies relative balance
//! adjustments, and records the transaction and ledger rows. A failure at
//! any point rolls the whole operation back; a wallet balance can never
//! change without its ledger entry and vice versa.

use super::{
    errors::{WalletError, WalletResult},
    ledger::build_entry,
    models::{self, EntryDirection, TransactionKind, UserId, Wallet, WalletId, WalletLedgerEntry},
    store::{TransactionRecorder, WalletStore, entry_from_row, transaction_from_row, wallet_from_row},
};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use std::sync::Arc;

/// Default number of ledger entries a history read returns
pub const DEFAULT_LEDGER_LIMIT: i64 = 50;

/// Maximum number of ledger entries a history read returns
pub const MAX_LEDGER_LIMIT: i64 = 500;

/// Wallet manager
#[derive(Clone)]
pub struct WalletManager {
    pool: Arc<PgPool>,
    wallets: WalletStore,
    transactions: TransactionRecorder,
}

impl WalletManager {
    /// Create a new wallet manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    ///
    /// # Returns
    ///
    /// * `WalletManager` - New wallet manager instance
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            wallets: WalletStore::new(),
            transactions: TransactionRecorder::new(),
        }
    }

    /// Credit a user's wallet, creating the wallet on first funding.
    ///
    /// Writes one `fund` transaction and one credit ledger entry whose
    /// snapshots are taken from the locked row before the adjustment.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Wallet owner
    /// * `amount` - Positive amount to credit
    ///
    /// # Returns
    ///
    /// * `WalletResult<Wallet>` - The wallet after the credit
    ///
    /// # Errors
    ///
    /// * `WalletError::InvalidAmount` - Amount is zero or negative
    pub async fn fund(&self, user_id: UserId, amount: Decimal) -> WalletResult<Wallet> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount(amount));
        }

        let mut tx = self.pool.begin().await?;

        // Lazy creation: the conflict-tolerant insert plus re-select means a
        // concurrent first funding finds and locks the surviving row instead
        // of erroring.
        let wallet = match self.wallets.get_for_update(&mut tx, user_id).await? {
            Some(wallet) => wallet,
            None => {
                self.wallets.create(&mut tx, user_id).await?;
                self.wallets
                    .get_for_update(&mut tx, user_id)
                    .await?
                    .ok_or_else(|| {
                        WalletError::TransactionFailed(format!(
                            "wallet for user {user_id} missing after creation"
                        ))
                    })?
            }
        };

        let transaction_id = self
            .transactions
            .record_transaction(&mut tx, wallet.id, user_id, TransactionKind::Fund, amount)
            .await?;

        let entry = build_entry(
            &wallet,
            user_id,
            transaction_id,
            TransactionKind::Fund,
            EntryDirection::Credit,
            amount,
            format!("Wallet funded with {amount}"),
        );

        let updated = self.wallets.adjust_balance(&mut tx, wallet.id, amount).await?;
        self.transactions.record_ledger_entry(&mut tx, &entry).await?;

        tx.commit().await?;

        tracing::info!(
            user_id = %user_id,
            amount = %amount,
            balance = %updated.ledger_balance,
            "wallet funded"
        );

        Ok(updated)
    }

    /// Move funds between two users' wallets.
    ///
    /// Both parties must already hold wallets. The operation writes two
    /// `transfer` transactions and two ledger entries (the sender's debit and
    /// the receiver's credit); all six writes commit or roll back together.
    ///
    /// A self-transfer is permitted and nets to zero: the debit is written
    /// first and the credit chains off the post-debit balance, so the stored
    /// balance is unchanged and the ledger still reads as a contiguous chain.
    ///
    /// # Arguments
    ///
    /// * `sender_id` - User sending funds
    /// * `receiver_id` - User receiving funds
    /// * `amount` - Positive amount to move
    ///
    /// # Errors
    ///
    /// * `WalletError::InvalidAmount` - Amount is zero or negative
    /// * `WalletError::InvalidCounterparty` - Either side has no wallet
    /// * `WalletError::InsufficientBalance` - Sender cannot cover the amount
    pub async fn transfer_funds(
        &self,
        sender_id: UserId,
        receiver_id: UserId,
        amount: Decimal,
    ) -> WalletResult<()> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount(amount));
        }

        let mut tx = self.pool.begin().await?;

        let sender = self
            .wallets
            .get(&mut tx, sender_id)
            .await?
            .ok_or(WalletError::InvalidCounterparty)?;
        let receiver = self
            .wallets
            .get(&mut tx, receiver_id)
            .await?
            .ok_or(WalletError::InvalidCounterparty)?;

        // Lock both rows in ascending wallet-id order; opposing transfers
        // then queue on the same first lock instead of deadlocking.
        let (sender, receiver) = if sender.id == receiver.id {
            let locked = self.lock_wallet(&mut tx, sender.id).await?;
            (locked.clone(), locked)
        } else if sender.id < receiver.id {
            let sender = self.lock_wallet(&mut tx, sender.id).await?;
            let receiver = self.lock_wallet(&mut tx, receiver.id).await?;
            (sender, receiver)
        } else {
            let receiver = self.lock_wallet(&mut tx, receiver.id).await?;
            let sender = self.lock_wallet(&mut tx, sender.id).await?;
            (sender, receiver)
        };

        if sender.available_balance < amount {
            return Err(WalletError::InsufficientBalance {
                available: sender.available_balance,
                required: amount,
            });
        }

        let debit_transaction_id = self
            .transactions
            .record_transaction(&mut tx, sender.id, sender_id, TransactionKind::Transfer, amount)
            .await?;
        let credit_transaction_id = self
            .transactions
            .record_transaction(
                &mut tx,
                receiver.id,
                receiver_id,
                TransactionKind::Transfer,
                amount,
            )
            .await?;

        let debit_entry = build_entry(
            &sender,
            sender_id,
            debit_transaction_id,
            TransactionKind::Transfer,
            EntryDirection::Debit,
            amount,
            format!("Transferred {amount} to user {receiver_id}"),
        );
        let sender_after = self.wallets.adjust_balance(&mut tx, sender.id, -amount).await?;

        // For a self-transfer the credit snapshot is the post-debit row, so
        // the two entries chain instead of both reading the starting balance.
        let credit_snapshot = if receiver.id == sender.id {
            sender_after
        } else {
            receiver
        };
        let credit_entry = build_entry(
            &credit_snapshot,
            receiver_id,
            credit_transaction_id,
            TransactionKind::Transfer,
            EntryDirection::Credit,
            amount,
            format!("Received {amount} from user {sender_id}"),
        );
        self.wallets.adjust_balance(&mut tx, credit_snapshot.id, amount).await?;

        self.transactions.record_ledger_entry(&mut tx, &debit_entry).await?;
        self.transactions.record_ledger_entry(&mut tx, &credit_entry).await?;

        tx.commit().await?;

        tracing::info!(
            sender_id = %sender_id,
            receiver_id = %receiver_id,
            amount = %amount,
            "transfer completed"
        );

        Ok(())
    }

    /// Debit a user's wallet for withdrawal.
    ///
    /// Writes one `withdraw` transaction and one debit ledger entry. Unlike
    /// transfer, a missing wallet here is a not-found condition rather than
    /// a validation failure.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Wallet owner
    /// * `amount` - Positive amount to withdraw
    ///
    /// # Returns
    ///
    /// * `WalletResult<Wallet>` - The wallet after the debit
    ///
    /// # Errors
    ///
    /// * `WalletError::InvalidAmount` - Amount is zero or negative
    /// * `WalletError::WalletNotFound` - User has no wallet
    /// * `WalletError::InsufficientBalance` - Balance cannot cover the amount
    pub async fn withdraw_funds(&self, user_id: UserId, amount: Decimal) -> WalletResult<Wallet> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount(amount));
        }

        let mut tx = self.pool.begin().await?;

        let wallet = self
            .wallets
            .get_for_update(&mut tx, user_id)
            .await?
            .ok_or(WalletError::WalletNotFound(user_id))?;

        if wallet.available_balance < amount {
            return Err(WalletError::InsufficientBalance {
                available: wallet.available_balance,
                required: amount,
            });
        }

        let updated = self.wallets.adjust_balance(&mut tx, wallet.id, -amount).await?;
        let transaction_id = self
            .transactions
            .record_transaction(&mut tx, wallet.id, user_id, TransactionKind::Withdraw, amount)
            .await?;

        let entry = build_entry(
            &wallet,
            user_id,
            transaction_id,
            TransactionKind::Withdraw,
            EntryDirection::Debit,
            amount,
            format!("Withdrawal of {amount} completed"),
        );
        self.transactions.record_ledger_entry(&mut tx, &entry).await?;

        tx.commit().await?;

        tracing::info!(
            user_id = %user_id,
            amount = %amount,
            balance = %updated.ledger_balance,
            "withdrawal completed"
        );

        Ok(updated)
    }

    /// Get wallet state for a user
    ///
    /// # Arguments
    ///
    /// * `user_id` - User ID
    ///
    /// # Returns
    ///
    /// * `WalletResult<Wallet>` - Wallet information or error
    pub async fn get_wallet(&self, user_id: UserId) -> WalletResult<Wallet> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, ledger_balance, available_balance, created_at, updated_at
            FROM wallets
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(WalletError::WalletNotFound(user_id))?;

        Ok(wallet_from_row(&row))
    }

    /// Get ledger entries for a user, newest first
    ///
    /// # Arguments
    ///
    /// * `user_id` - User ID
    /// * `limit` - Maximum number of entries to return (defaults to
    ///   [`DEFAULT_LEDGER_LIMIT`], capped at [`MAX_LEDGER_LIMIT`])
    ///
    /// # Returns
    ///
    /// * `WalletResult<Vec<WalletLedgerEntry>>` - List of ledger entries
    pub async fn get_ledger_entries(
        &self,
        user_id: UserId,
        limit: Option<i64>,
    ) -> WalletResult<Vec<WalletLedgerEntry>> {
        let limit = limit.unwrap_or(DEFAULT_LEDGER_LIMIT).clamp(1, MAX_LEDGER_LIMIT);

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, wallet_id, transaction_id, type, direction, amount,
                   previous_balance, new_balance, status, description, created_at
            FROM wallet_ledger
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(entry_from_row).collect()
    }

    /// Get transactions for a user, newest first
    ///
    /// # Arguments
    ///
    /// * `user_id` - User ID
    /// * `limit` - Maximum number of transactions to return (defaults to
    ///   [`DEFAULT_LEDGER_LIMIT`], capped at [`MAX_LEDGER_LIMIT`])
    ///
    /// # Returns
    ///
    /// * `WalletResult<Vec<Transaction>>` - List of transactions
    pub async fn get_transactions(
        &self,
        user_id: UserId,
        limit: Option<i64>,
    ) -> WalletResult<Vec<models::Transaction>> {
        let limit = limit.unwrap_or(DEFAULT_LEDGER_LIMIT).clamp(1, MAX_LEDGER_LIMIT);

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, wallet_id, type, amount, status, created_at
            FROM transactions
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.iter().map(transaction_from_row).collect()
    }

    async fn lock_wallet(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        wallet_id: WalletId,
    ) -> WalletResult<Wallet> {
        self.wallets.lock(tx, wallet_id).await?.ok_or_else(|| {
            WalletError::TransactionFailed(format!("wallet {wallet_id} vanished while locking"))
        })
    }
}
