//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for banks, customers, accounts, and transfers
//! - Request validation
//! - Response types and error mapping

pub mod error;
pub mod routes;
pub mod validation;

use axum::Router;
use rand::rngs::StdRng;
use remita_core::transfer::TransferEngine;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Transfer engine holding the retry policy and failure chance.
    pub engine: Arc<TransferEngine>,
    /// Process-wide seed source for settlement simulation and retry jitter.
    /// Locked only long enough to derive a per-request generator.
    pub rng: Arc<tokio::sync::Mutex<StdRng>>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
