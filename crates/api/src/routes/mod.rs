//! API route definitions.

use axum::Router;

use crate::AppState;

pub mod accounts;
pub mod banks;
pub mod customers;
pub mod health;
pub mod transfers;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(banks::routes())
        .merge(customers::routes())
        .merge(accounts::routes())
        .merge(transfers::routes())
}
