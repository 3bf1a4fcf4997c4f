//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod bank;
pub mod customer;
pub mod transfer;

pub use account::{AccountError, AccountRepository, AccountWithRelations, CreateAccountInput};
pub use bank::{BankError, BankRepository, CreateBankInput};
pub use customer::{CreateCustomerInput, CustomerError, CustomerRepository};
pub use transfer::{RecordTransferInput, RecordedTransfer, TransferLogError, TransferRepository};
