//! Transfer orchestration route.
//!
//! The handler resolves both accounts, validates the transfer against
//! the business rules, runs settlement (with retries) and only then
//! persists the balance movement. A terminal settlement failure
//! therefore leaves every balance untouched.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use chrono::{DateTime, FixedOffset};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::accounts::AccountResponse;
use crate::validation::{validate_amount, validate_bank_code, validate_not_blank};
use crate::AppState;
use remita_core::retry::TokioSleeper;
use remita_core::transfer::{AccountState, plan_transfer};
use remita_db::repositories::account::{AccountError, AccountRepository, AccountWithRelations};
use remita_db::repositories::transfer::{RecordTransferInput, TransferRepository};
use remita_shared::error::AppError;
use remita_shared::types::format_amount;

/// Natural key identifying an account in a transfer request.
#[derive(Debug, Deserialize)]
pub struct AccountIdentification {
    /// COMPE code of the bank holding the account.
    pub bank_code: String,
    /// Branch number.
    pub branch: String,
    /// Account number.
    pub account_number: String,
}

/// Request body for performing a transfer.
#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    /// Account the money leaves.
    pub source_account: AccountIdentification,
    /// Account the money arrives at.
    pub destination_account: AccountIdentification,
    /// Amount to transfer, positive, at most 2 decimal places.
    pub amount: Decimal,
}

/// Response for a completed transfer.
#[derive(Debug, Serialize)]
pub struct TransferResponse {
    /// Transfer log ID.
    pub id: Uuid,
    /// Amount credited to the destination.
    pub amount: String,
    /// Commission charged to the source; "0.00" for intra-bank transfers.
    pub commission: String,
    /// When the transfer was persisted.
    pub performed_at: DateTime<FixedOffset>,
    /// Source account after the transfer.
    pub source_account: AccountResponse,
    /// Destination account after the transfer.
    pub destination_account: AccountResponse,
}

/// Creates the transfer routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/transfers", post(perform_transfer))
}

fn validate_identification(id: &AccountIdentification) -> Result<(), AppError> {
    validate_bank_code(&id.bank_code)?;
    validate_not_blank("Branch", &id.branch)?;
    validate_not_blank("Account number", &id.account_number)?;
    Ok(())
}

/// Derives a per-request generator from the shared one.
///
/// The shared lock is held only for the seed draw and released before
/// settlement starts, so one request's retry backoff never blocks other
/// transfers. Seeding the shared generator still makes the whole request
/// stream deterministic.
async fn derive_rng(shared: &tokio::sync::Mutex<StdRng>) -> StdRng {
    let mut shared = shared.lock().await;
    StdRng::seed_from_u64(shared.next_u64())
}

/// Resolves an account by natural key; a miss is reported as a missing
/// related entity (422), not a plain not-found.
async fn fetch_account(
    repo: &AccountRepository,
    id: &AccountIdentification,
) -> Result<AccountWithRelations, ApiError> {
    repo.find_by_natural_key(&id.bank_code, &id.branch, &id.account_number)
        .await
        .map_err(|err| match err {
            AccountError::NotFound { .. } => {
                ApiError::from(AppError::RelatedEntityMissing(err.to_string()))
            }
            other => ApiError::from(other),
        })
}

/// POST /transfers - Transfer money between two accounts.
async fn perform_transfer(
    State(state): State<AppState>,
    Json(payload): Json<TransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_identification(&payload.source_account)?;
    validate_identification(&payload.destination_account)?;
    validate_amount(payload.amount)?;

    let account_repo = AccountRepository::new((*state.db).clone());
    let source = fetch_account(&account_repo, &payload.source_account).await?;
    let destination = fetch_account(&account_repo, &payload.destination_account).await?;

    let plan = plan_transfer(
        &AccountState {
            id: source.account.id,
            bank_id: source.account.bank_id,
            balance: source.account.balance,
        },
        &AccountState {
            id: destination.account.id,
            bank_id: destination.account.bank_id,
            balance: destination.account.balance,
        },
        payload.amount,
    )?;

    // Settlement first; balances only move once the downstream call
    // has succeeded.
    let mut rng = derive_rng(&state.rng).await;
    state.engine.settle(&plan, &mut rng, &TokioSleeper).await?;

    let transfer_repo = TransferRepository::new((*state.db).clone());
    let recorded = transfer_repo
        .record_transfer(RecordTransferInput {
            source_account_id: plan.source_id,
            destination_account_id: plan.destination_id,
            amount: plan.amount,
            commission: plan.commission,
        })
        .await?;

    info!(
        transfer_id = %recorded.log.id,
        source = %plan.source_id,
        destination = %plan.destination_id,
        amount = %plan.amount,
        commission = %plan.commission,
        "Transfer completed"
    );

    // Report the balances as committed, not the pre-lock snapshots.
    Ok(Json(TransferResponse {
        id: recorded.log.id,
        amount: format_amount(&recorded.log.amount),
        commission: format_amount(&recorded.log.commission),
        performed_at: recorded.log.performed_at,
        source_account: AccountResponse::with_balance(&source, recorded.source.balance),
        destination_account: AccountResponse::with_balance(
            &destination,
            recorded.destination.balance,
        ),
    }))
}
