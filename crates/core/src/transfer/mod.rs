//! Transfer rule engine, settlement policies, and errors.
//!
//! The flow for one transfer:
//! 1. [`rules::plan_transfer`] validates the request against account state
//!    and produces a [`rules::TransferPlan`] with the commission applied.
//! 2. [`engine::TransferEngine::settle`] executes the plan's settlement
//!    policy, retrying transient failures with bounded backoff.
//! 3. The caller persists the balance changes and the transfer log in a
//!    single database transaction (see `remita-db`). The settlement call
//!    deliberately runs first: it is effect-free on failure, so a terminal
//!    failure leaves no state to roll back.

pub mod engine;
pub mod error;
pub mod rules;
pub mod strategy;

pub use engine::TransferEngine;
pub use error::TransferError;
pub use rules::{AccountState, TransferPlan, plan_transfer};
pub use strategy::{INTER_BANK_COMMISSION, SettlementPolicy};
