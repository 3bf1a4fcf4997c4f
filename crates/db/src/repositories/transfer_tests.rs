//! Tests for the transfer repository against a mocked database.
//!
//! The mock serves queued rows in order, so these tests pin down the
//! lock acquisition order (ascending account id, independent of transfer
//! direction) and the guarantee that a rejected transfer performs no
//! writes: none of the rejection tests queue update or insert results,
//! so any attempted write would surface as a database error instead of
//! the expected rejection.

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DatabaseBackend, MockDatabase};
use uuid::Uuid;

use super::{RecordTransferInput, TransferLogError, TransferRepository};
use crate::entities::{accounts, transfer_logs};
use remita_shared::error::AppError;

fn account_row(id: Uuid, balance: Decimal) -> accounts::Model {
    let now = Utc::now().into();
    accounts::Model {
        id,
        bank_id: Uuid::from_u128(0xB1),
        customer_id: Uuid::from_u128(0xC1),
        branch: "0001".to_string(),
        account_number: format!("{id}"),
        balance,
        created_at: now,
        updated_at: now,
    }
}

fn log_row(source: Uuid, destination: Uuid) -> transfer_logs::Model {
    transfer_logs::Model {
        id: Uuid::from_u128(0xF0),
        source_account_id: source,
        destination_account_id: destination,
        amount: dec!(2000.00),
        commission: dec!(5.00),
        performed_at: Utc::now().into(),
    }
}

#[tokio::test]
async fn records_transfer_with_source_id_above_destination_id() {
    // Source has the higher id, so the destination row is locked first;
    // the repository must still apply the debit to the source.
    let source_id = Uuid::from_u128(9);
    let destination_id = Uuid::from_u128(1);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            // Lock order: ascending id, destination first.
            vec![account_row(destination_id, dec!(300.00))],
            vec![account_row(source_id, dec!(5000.00))],
            // Updated rows returned by the two UPDATEs, source first.
            vec![account_row(source_id, dec!(2995.00))],
            vec![account_row(destination_id, dec!(2300.00))],
        ])
        .append_query_results([vec![log_row(source_id, destination_id)]])
        .into_connection();

    let repo = TransferRepository::new(db);
    let recorded = repo
        .record_transfer(RecordTransferInput {
            source_account_id: source_id,
            destination_account_id: destination_id,
            amount: dec!(2000.00),
            commission: dec!(5.00),
        })
        .await
        .unwrap();

    assert_eq!(recorded.source.id, source_id);
    assert_eq!(recorded.source.balance, dec!(2995.00));
    assert_eq!(recorded.destination.id, destination_id);
    assert_eq!(recorded.destination.balance, dec!(2300.00));
    assert_eq!(recorded.log.source_account_id, source_id);
    assert_eq!(recorded.log.amount, dec!(2000.00));
    assert_eq!(recorded.log.commission, dec!(5.00));
}

#[tokio::test]
async fn drained_source_balance_is_rejected_without_writing() {
    let source_id = Uuid::from_u128(1);
    let destination_id = Uuid::from_u128(2);

    // The balance observed under the lock no longer covers the debit
    // planned from the pre-lock snapshot.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![account_row(source_id, dec!(100.00))],
            vec![account_row(destination_id, dec!(0.00))],
        ])
        .into_connection();

    let repo = TransferRepository::new(db);
    let error = repo
        .record_transfer(RecordTransferInput {
            source_account_id: source_id,
            destination_account_id: destination_id,
            amount: dec!(2000.00),
            commission: dec!(5.00),
        })
        .await
        .unwrap_err();

    match error {
        TransferLogError::BalanceChanged { debit, available } => {
            assert_eq!(debit, dec!(2005.00));
            assert_eq!(available, dec!(100.00));
        }
        other => panic!("expected BalanceChanged, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_account_row_is_rejected_without_writing() {
    let source_id = Uuid::from_u128(1);
    let destination_id = Uuid::from_u128(2);

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<accounts::Model>::new()])
        .into_connection();

    let repo = TransferRepository::new(db);
    let error = repo
        .record_transfer(RecordTransferInput {
            source_account_id: source_id,
            destination_account_id: destination_id,
            amount: dec!(10.00),
            commission: Decimal::ZERO,
        })
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        TransferLogError::AccountMissing(id) if id == source_id
    ));
}

#[test]
fn balance_changed_maps_to_conflict() {
    let error = TransferLogError::BalanceChanged {
        debit: dec!(2005.00),
        available: dec!(100.00),
    };
    let app_error = AppError::from(error);
    assert_eq!(app_error.status_code(), 409);
    assert_eq!(app_error.error_code(), "CONFLICT");
}

#[test]
fn account_missing_maps_to_not_found() {
    let app_error = AppError::from(TransferLogError::AccountMissing(Uuid::from_u128(7)));
    assert_eq!(app_error.status_code(), 404);
}
