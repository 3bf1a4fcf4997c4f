//! `SeaORM` entity definitions.

pub mod accounts;
pub mod banks;
pub mod customers;
pub mod transfer_logs;
