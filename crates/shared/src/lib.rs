//! Shared types, errors, and configuration for Remita.
//!
//! This crate provides common types used across all other crates:
//! - Money scale helpers (two decimal places, never floats)
//! - Application-wide error types with HTTP mappings
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, TransferConfig};
pub use error::{AppError, AppResult};
