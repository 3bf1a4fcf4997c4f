//! Shared domain types.

pub mod money;

pub use money::{MONEY_SCALE, format_amount, has_money_scale};
