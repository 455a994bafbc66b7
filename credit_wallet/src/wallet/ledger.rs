//! Ledger entry construction.
//!
//! Entries are built in memory from a wallet snapshot read under a row lock,
//! then persisted unchanged. Keeping the construction pure keeps the balance
//! arithmetic testable without a database.

use super::models::{
    EntryDirection, EntryStatus, TransactionId, TransactionKind, UserId, Wallet, WalletLedgerEntry,
};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Build the ledger entry for a single balance mutation.
///
/// `wallet` must be the row as it stood before the mutation: the entry's
/// `previous_balance` is its ledger balance, and `new_balance` is that value
/// plus the amount for a credit or minus the amount for a debit.
///
/// # Arguments
///
/// * `wallet` - Wallet snapshot taken before the balance adjustment
/// * `user_id` - Owner of the ledger row (sender or receiver)
/// * `transaction_id` - Transaction this entry belongs to
/// * `kind` - Operation kind (`fund`, `transfer`, `withdraw`)
/// * `direction` - Whether the wallet was credited or debited
/// * `amount` - Positive amount that was moved
/// * `description` - Human-readable note for statements
#[allow(clippy::too_many_arguments)]
pub fn build_entry(
    wallet: &Wallet,
    user_id: UserId,
    transaction_id: TransactionId,
    kind: TransactionKind,
    direction: EntryDirection,
    amount: Decimal,
    description: String,
) -> WalletLedgerEntry {
    let previous_balance = wallet.ledger_balance;
    let new_balance = match direction {
        EntryDirection::Credit => previous_balance + amount,
        EntryDirection::Debit => previous_balance - amount,
    };

    WalletLedgerEntry {
        id: Uuid::new_v4(),
        user_id,
        wallet_id: wallet.id,
        transaction_id,
        kind,
        direction,
        amount,
        previous_balance,
        new_balance,
        status: EntryStatus::Completed,
        description: Some(description),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn wallet_with_balance(balance: Decimal) -> Wallet {
        let now = Utc::now();
        Wallet {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            ledger_balance: balance,
            available_balance: balance,
            created_at: now,
            updated_at: now,
        }
    }

    // Strategy to generate money amounts with at most 2 decimal places
    fn money_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000_00).prop_map(|cents| Decimal::new(cents, 2))
    }

    // Strategy to generate balances, including zero
    fn balance_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..=1_000_000_00).prop_map(|cents| Decimal::new(cents, 2))
    }

    #[test]
    fn test_credit_entry_snapshots_balances() {
        let wallet = wallet_with_balance(dec!(0.00));
        let transaction_id = Uuid::new_v4();
        let entry = build_entry(
            &wallet,
            wallet.user_id,
            transaction_id,
            TransactionKind::Fund,
            EntryDirection::Credit,
            dec!(100.00),
            "Wallet funded with 100.00".to_string(),
        );

        assert_eq!(entry.previous_balance, dec!(0.00));
        assert_eq!(entry.new_balance, dec!(100.00));
        assert_eq!(entry.amount, dec!(100.00));
        assert_eq!(entry.wallet_id, wallet.id);
        assert_eq!(entry.transaction_id, transaction_id);
        assert_eq!(entry.status, EntryStatus::Completed);
        assert_eq!(
            entry.description.as_deref(),
            Some("Wallet funded with 100.00")
        );
    }

    #[test]
    fn test_debit_entry_snapshots_balances() {
        let wallet = wallet_with_balance(dec!(100.00));
        let entry = build_entry(
            &wallet,
            wallet.user_id,
            Uuid::new_v4(),
            TransactionKind::Withdraw,
            EntryDirection::Debit,
            dec!(40.00),
            "Withdrawal of 40.00 completed".to_string(),
        );

        assert_eq!(entry.previous_balance, dec!(100.00));
        assert_eq!(entry.new_balance, dec!(60.00));
        assert_eq!(entry.direction, EntryDirection::Debit);
    }

    #[test]
    fn test_entry_serializes_kind_under_type_key() {
        let wallet = wallet_with_balance(dec!(5.00));
        let entry = build_entry(
            &wallet,
            wallet.user_id,
            Uuid::new_v4(),
            TransactionKind::Fund,
            EntryDirection::Credit,
            dec!(5.00),
            "Wallet funded with 5.00".to_string(),
        );

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "fund");
        assert_eq!(json["direction"], "credit");
        assert_eq!(json["status"], "completed");
    }

    proptest! {
        #[test]
        fn test_credit_delta_is_exactly_amount(
            balance in balance_strategy(),
            amount in money_strategy(),
        ) {
            let wallet = wallet_with_balance(balance);
            let entry = build_entry(
                &wallet,
                wallet.user_id,
                Uuid::new_v4(),
                TransactionKind::Fund,
                EntryDirection::Credit,
                amount,
                format!("Wallet funded with {amount}"),
            );

            prop_assert_eq!(entry.new_balance - entry.previous_balance, amount);
            prop_assert_eq!(entry.previous_balance, balance);
        }

        #[test]
        fn test_debit_delta_is_exactly_amount(
            balance in balance_strategy(),
            amount in money_strategy(),
        ) {
            let wallet = wallet_with_balance(balance);
            let entry = build_entry(
                &wallet,
                wallet.user_id,
                Uuid::new_v4(),
                TransactionKind::Withdraw,
                EntryDirection::Debit,
                amount,
                format!("Withdrawal of {amount} completed"),
            );

            prop_assert_eq!(entry.previous_balance - entry.new_balance, amount);
        }

        #[test]
        fn test_opposite_directions_cancel(
            balance in balance_strategy(),
            amount in money_strategy(),
        ) {
            let wallet = wallet_with_balance(balance);
            let debit = build_entry(
                &wallet,
                wallet.user_id,
                Uuid::new_v4(),
                TransactionKind::Transfer,
                EntryDirection::Debit,
                amount,
                String::new(),
            );
            let credit = build_entry(
                &wallet,
                wallet.user_id,
                Uuid::new_v4(),
                TransactionKind::Transfer,
                EntryDirection::Credit,
                amount,
                String::new(),
            );

            prop_assert_eq!(
                debit.new_balance + credit.new_balance,
                balance + balance
            );
        }
    }
}
