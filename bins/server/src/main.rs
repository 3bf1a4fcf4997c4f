//! Remita API Server
//!
//! Main entry point for the Remita transfer backend.

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remita_api::{AppState, create_router};
use remita_core::retry::RetryPolicy;
use remita_core::transfer::TransferEngine;
use remita_db::connect;
use remita_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "remita=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Build the transfer engine from configuration
    let retry = RetryPolicy {
        max_attempts: config.transfer.max_retry_attempts,
        initial_delay: Duration::from_millis(config.transfer.initial_retry_delay_ms),
        max_delay: Duration::from_millis(config.transfer.max_retry_delay_ms),
        multiplier: config.transfer.backoff_multiplier,
        jitter: config.transfer.retry_jitter,
    };
    let engine = TransferEngine::new(retry, config.transfer.inter_bank_failure_chance);
    info!(
        failure_chance = config.transfer.inter_bank_failure_chance,
        max_attempts = config.transfer.max_retry_attempts,
        "Transfer engine configured"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        engine: Arc::new(engine),
        rng: Arc::new(tokio::sync::Mutex::new(StdRng::from_os_rng())),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
