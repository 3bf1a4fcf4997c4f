//! Bank management routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::validation::{validate_bank_code, validate_not_blank};
use crate::AppState;
use remita_db::repositories::bank::{BankRepository, CreateBankInput};

/// Request body for creating a bank.
#[derive(Debug, Deserialize)]
pub struct CreateBankRequest {
    /// Bank name.
    pub name: String,
    /// COMPE code for the bank, 3 digits.
    pub code: String,
}

/// Response for a bank.
#[derive(Debug, Serialize)]
pub struct BankResponse {
    /// Bank ID.
    pub id: Uuid,
    /// Bank name.
    pub name: String,
    /// Bank code.
    pub code: String,
}

impl From<remita_db::entities::banks::Model> for BankResponse {
    fn from(model: remita_db::entities::banks::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
        }
    }
}

/// Creates the bank routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/banks", get(list_banks))
        .route("/banks", post(create_bank))
}

/// GET /banks - List all banks.
async fn list_banks(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = BankRepository::new((*state.db).clone());
    let banks = repo.list().await?;
    let response: Vec<BankResponse> = banks.into_iter().map(BankResponse::from).collect();
    Ok(Json(response))
}

/// POST /banks - Create a bank.
async fn create_bank(
    State(state): State<AppState>,
    Json(payload): Json<CreateBankRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_not_blank("Name", &payload.name)?;
    validate_bank_code(&payload.code)?;

    let repo = BankRepository::new((*state.db).clone());
    let bank = repo
        .create(CreateBankInput {
            name: payload.name,
            code: payload.code,
        })
        .await?;

    info!(bank_id = %bank.id, code = %bank.code, "Bank created");

    Ok((StatusCode::CREATED, Json(BankResponse::from(bank))))
}
