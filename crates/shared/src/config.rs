//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Transfer subsystem configuration.
    #[serde(default)]
    pub transfer: TransferConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Transfer subsystem configuration.
///
/// Defaults match the reference values: a 30% simulated failure chance for
/// inter-bank settlement and 6 retry attempts, enough for a cumulative
/// success rate of ~99.93% (`1 - 0.3^6`).
#[derive(Debug, Clone, Deserialize)]
pub struct TransferConfig {
    /// Probability in `[0, 1]` that a single inter-bank settlement attempt fails.
    #[serde(default = "default_failure_chance")]
    pub inter_bank_failure_chance: f64,
    /// Maximum settlement attempts before the failure becomes terminal.
    #[serde(default = "default_max_retry_attempts")]
    pub max_retry_attempts: u32,
    /// Delay before the first retry, in milliseconds.
    #[serde(default = "default_initial_retry_delay_ms")]
    pub initial_retry_delay_ms: u64,
    /// Upper bound on any single retry delay, in milliseconds.
    #[serde(default = "default_max_retry_delay_ms")]
    pub max_retry_delay_ms: u64,
    /// Exponential backoff multiplier applied between attempts.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Whether to add random jitter to each computed delay.
    #[serde(default = "default_retry_jitter")]
    pub retry_jitter: bool,
}

fn default_failure_chance() -> f64 {
    0.3
}

fn default_max_retry_attempts() -> u32 {
    6
}

// Low delay times so that a full retry cycle stays under a few seconds.
fn default_initial_retry_delay_ms() -> u64 {
    100
}

fn default_max_retry_delay_ms() -> u64 {
    1000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_retry_jitter() -> bool {
    true
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            inter_bank_failure_chance: default_failure_chance(),
            max_retry_attempts: default_max_retry_attempts(),
            initial_retry_delay_ms: default_initial_retry_delay_ms(),
            max_retry_delay_ms: default_max_retry_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            retry_jitter: default_retry_jitter(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("REMITA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
