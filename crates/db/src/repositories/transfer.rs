//! Transfer repository: atomic balance movement plus audit log.
//!
//! Settlement happens before this repository is called; this module is
//! only responsible for making the already-settled transfer durable.
//! Both balance updates and the log row commit in a single database
//! transaction, so a transfer is never half-visible.

use remita_shared::error::AppError;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::entities::{accounts, transfer_logs};

/// Error types for transfer persistence.
#[derive(Debug, thiserror::Error)]
pub enum TransferLogError {
    /// Account disappeared between planning and persistence.
    #[error("Account not found: {0}")]
    AccountMissing(Uuid),

    /// Source balance changed under a concurrent transfer and no longer
    /// covers the debit.
    #[error("Source balance changed concurrently: debit of {debit} exceeds balance of {available}")]
    BalanceChanged {
        /// Total debit the transfer would apply.
        debit: Decimal,
        /// Balance observed under the row lock.
        available: Decimal,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<TransferLogError> for AppError {
    fn from(err: TransferLogError) -> Self {
        match err {
            TransferLogError::AccountMissing(_) => Self::NotFound(err.to_string()),
            TransferLogError::BalanceChanged { .. } => Self::Conflict(err.to_string()),
            TransferLogError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// Outcome of a recorded transfer: the log row plus both account rows
/// exactly as committed, so callers report persisted balances rather
/// than pre-lock snapshots.
#[derive(Debug, Clone)]
pub struct RecordedTransfer {
    /// The inserted audit log row.
    pub log: transfer_logs::Model,
    /// Source account after the debit.
    pub source: accounts::Model,
    /// Destination account after the credit.
    pub destination: accounts::Model,
}

/// Input for recording a settled transfer.
#[derive(Debug, Clone)]
pub struct RecordTransferInput {
    /// Source account id.
    pub source_account_id: Uuid,
    /// Destination account id.
    pub destination_account_id: Uuid,
    /// Amount credited to the destination.
    pub amount: Decimal,
    /// Commission charged on top of the amount; zero for intra-bank.
    pub commission: Decimal,
}

/// Repository for transfer persistence.
#[derive(Debug)]
pub struct TransferRepository {
    db: DatabaseConnection,
}

impl TransferRepository {
    /// Creates a new transfer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a settled transfer: debits the source, credits the
    /// destination, and writes the audit log row, all in one database
    /// transaction.
    ///
    /// Both account rows are locked `FOR UPDATE` in ascending id order
    /// so two concurrent transfers over the same pair cannot deadlock,
    /// and the source balance is re-verified under the lock.
    ///
    /// # Errors
    ///
    /// Returns `TransferLogError::AccountMissing` if either account row
    /// is gone, `TransferLogError::BalanceChanged` if a concurrent
    /// transfer drained the source, or a database error.
    pub async fn record_transfer(
        &self,
        input: RecordTransferInput,
    ) -> Result<RecordedTransfer, TransferLogError> {
        let txn = self.db.begin().await?;

        // Lock in ascending id order regardless of transfer direction.
        let (first_id, second_id) =
            if input.source_account_id <= input.destination_account_id {
                (input.source_account_id, input.destination_account_id)
            } else {
                (input.destination_account_id, input.source_account_id)
            };
        let first = Self::lock_account(&txn, first_id).await?;
        let second = Self::lock_account(&txn, second_id).await?;

        let (source, destination) = if first.id == input.source_account_id {
            (first, second)
        } else {
            (second, first)
        };

        let debit = input.amount + input.commission;
        if source.balance < debit {
            return Err(TransferLogError::BalanceChanged {
                debit,
                available: source.balance,
            });
        }

        let now: chrono::DateTime<chrono::FixedOffset> = chrono::Utc::now().into();

        let new_source_balance = source.balance - debit;
        let mut source_active: accounts::ActiveModel = source.into();
        source_active.balance = Set(new_source_balance);
        source_active.updated_at = Set(now);
        let source = source_active.update(&txn).await?;

        let new_destination_balance = destination.balance + input.amount;
        let mut destination_active: accounts::ActiveModel = destination.into();
        destination_active.balance = Set(new_destination_balance);
        destination_active.updated_at = Set(now);
        let destination = destination_active.update(&txn).await?;

        let log = transfer_logs::ActiveModel {
            id: Set(Uuid::new_v4()),
            source_account_id: Set(input.source_account_id),
            destination_account_id: Set(input.destination_account_id),
            amount: Set(input.amount),
            commission: Set(input.commission),
            performed_at: Set(now),
        };
        let log = log.insert(&txn).await?;

        txn.commit().await?;
        debug!(
            transfer_id = %log.id,
            source = %log.source_account_id,
            destination = %log.destination_account_id,
            "Transfer persisted"
        );

        Ok(RecordedTransfer {
            log,
            source,
            destination,
        })
    }

    async fn lock_account(
        txn: &DatabaseTransaction,
        id: Uuid,
    ) -> Result<accounts::Model, TransferLogError> {
        accounts::Entity::find()
            .filter(accounts::Column::Id.eq(id))
            .lock_exclusive()
            .one(txn)
            .await?
            .ok_or(TransferLogError::AccountMissing(id))
    }
}

#[cfg(test)]
#[path = "transfer_tests.rs"]
mod tests;
