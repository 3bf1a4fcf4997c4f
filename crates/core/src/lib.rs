//! Core business logic for Remita.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `transfer` - Transfer rule engine, settlement policies, and errors
//! - `retry` - Generic bounded retry with exponential backoff and jitter

pub mod retry;
pub mod transfer;
