//! Account management routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::validation::{validate_balance, validate_bank_code, validate_cpf, validate_not_blank};
use crate::AppState;
use remita_db::repositories::account::{
    AccountRepository, AccountWithRelations, CreateAccountInput,
};
use remita_shared::types::format_amount;

/// Request body for creating an account.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    /// COMPE code of the bank holding the account.
    pub bank_code: String,
    /// CPF of the customer who owns the account.
    pub customer_cpf: String,
    /// Branch number.
    pub branch: String,
    /// Account number.
    pub account_number: String,
    /// Opening balance (default: 0).
    pub balance: Option<Decimal>,
}

/// Bank summary embedded inside account responses.
#[derive(Debug, Serialize)]
pub struct BankSummary {
    /// Bank name.
    pub name: String,
    /// Bank code.
    pub code: String,
}

/// Customer summary embedded inside account responses.
#[derive(Debug, Serialize)]
pub struct CustomerSummary {
    /// Customer full name.
    pub full_name: String,
    /// CPF.
    pub cpf: String,
}

/// Response for an account.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    /// Account ID.
    pub id: Uuid,
    /// Bank holding the account.
    pub bank: BankSummary,
    /// Customer who owns the account.
    pub customer: CustomerSummary,
    /// Branch number.
    pub branch: String,
    /// Account number.
    pub account_number: String,
    /// Current balance, formatted with 2 decimal places.
    pub balance: String,
}

impl AccountResponse {
    /// Builds the response from an account with its relations, using the
    /// given balance instead of the stored one (transfer responses report
    /// the post-transfer balances).
    pub(crate) fn with_balance(related: &AccountWithRelations, balance: Decimal) -> Self {
        Self {
            id: related.account.id,
            bank: BankSummary {
                name: related.bank.name.clone(),
                code: related.bank.code.clone(),
            },
            customer: CustomerSummary {
                full_name: related.customer.full_name.clone(),
                cpf: related.customer.cpf.clone(),
            },
            branch: related.account.branch.clone(),
            account_number: related.account.account_number.clone(),
            balance: format_amount(&balance),
        }
    }
}

impl From<AccountWithRelations> for AccountResponse {
    fn from(related: AccountWithRelations) -> Self {
        let balance = related.account.balance;
        Self::with_balance(&related, balance)
    }
}

/// Creates the account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts", post(create_account))
}

/// GET /accounts - List all accounts with their bank and owner.
async fn list_accounts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = AccountRepository::new((*state.db).clone());
    let accounts = repo.list().await?;
    let response: Vec<AccountResponse> =
        accounts.into_iter().map(AccountResponse::from).collect();
    Ok(Json(response))
}

/// POST /accounts - Create an account for an existing bank and customer.
async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_bank_code(&payload.bank_code)?;
    validate_cpf(&payload.customer_cpf)?;
    validate_not_blank("Branch", &payload.branch)?;
    validate_not_blank("Account number", &payload.account_number)?;
    let balance = payload.balance.unwrap_or(Decimal::ZERO);
    validate_balance(balance)?;

    let repo = AccountRepository::new((*state.db).clone());
    let account = repo
        .create(CreateAccountInput {
            bank_code: payload.bank_code,
            customer_cpf: payload.customer_cpf,
            branch: payload.branch,
            account_number: payload.account_number,
            initial_balance: balance,
        })
        .await?;

    info!(
        account_id = %account.account.id,
        bank_code = %account.bank.code,
        "Account created"
    );

    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}
