//! Customer management routes.

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
use crate::validation::{validate_cpf, validate_not_blank};
use crate::AppState;
use remita_db::repositories::customer::{CreateCustomerInput, CustomerRepository};

/// Request body for creating a customer.
#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    /// Customer full name.
    pub full_name: String,
    /// CPF, 11 digits, no dots or dashes.
    pub cpf: String,
}

/// Response for a customer.
#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    /// Customer ID.
    pub id: Uuid,
    /// Customer full name.
    pub full_name: String,
    /// CPF.
    pub cpf: String,
}

impl From<remita_db::entities::customers::Model> for CustomerResponse {
    fn from(model: remita_db::entities::customers::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            cpf: model.cpf,
        }
    }
}

/// Creates the customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers", post(create_customer))
}

/// GET /customers - List all customers.
async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = CustomerRepository::new((*state.db).clone());
    let customers = repo.list().await?;
    let response: Vec<CustomerResponse> =
        customers.into_iter().map(CustomerResponse::from).collect();
    Ok(Json(response))
}

/// POST /customers - Create a customer.
async fn create_customer(
    State(state): State<AppState>,
    Json(payload): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_not_blank("Full name", &payload.full_name)?;
    validate_cpf(&payload.cpf)?;

    let repo = CustomerRepository::new((*state.db).clone());
    let customer = repo
        .create(CreateCustomerInput {
            full_name: payload.full_name,
            cpf: payload.cpf,
        })
        .await?;

    info!(customer_id = %customer.id, "Customer created");

    Ok((StatusCode::CREATED, Json(CustomerResponse::from(customer))))
}
