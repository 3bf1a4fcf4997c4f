//! Account repository for database operations.
//!
//! Accounts are addressed by their natural key: bank code, branch,
//! and account number.

use remita_shared::error::AppError;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{accounts, banks, customers};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Bank referenced by code does not exist.
    #[error("Bank with code '{0}' not found")]
    BankNotFound(String),

    /// Customer referenced by CPF does not exist.
    #[error("Customer with CPF '{0}' not found")]
    CustomerNotFound(String),

    /// Natural key (bank, branch, account number) already taken.
    #[error("Account {branch}/{account_number} already exists at bank '{bank_code}'")]
    AlreadyExists {
        /// Bank code.
        bank_code: String,
        /// Branch number.
        branch: String,
        /// Account number.
        account_number: String,
    },

    /// Account not found by natural key.
    #[error("Account {branch}/{account_number} not found at bank '{bank_code}'")]
    NotFound {
        /// Bank code.
        bank_code: String,
        /// Branch number.
        branch: String,
        /// Account number.
        account_number: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::BankNotFound(_) | AccountError::CustomerNotFound(_) => {
                Self::RelatedEntityMissing(err.to_string())
            }
            AccountError::AlreadyExists { .. } => Self::Conflict(err.to_string()),
            AccountError::NotFound { .. } => Self::NotFound(err.to_string()),
            AccountError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Code of the bank that holds the account.
    pub bank_code: String,
    /// CPF of the customer who owns the account.
    pub customer_cpf: String,
    /// Branch number.
    pub branch: String,
    /// Account number, unique within (bank, branch).
    pub account_number: String,
    /// Opening balance.
    pub initial_balance: Decimal,
}

/// Account together with its bank and owner.
#[derive(Debug, Clone)]
pub struct AccountWithRelations {
    /// The account record.
    pub account: accounts::Model,
    /// The bank that holds the account.
    pub bank: banks::Model,
    /// The customer who owns the account.
    pub customer: customers::Model,
}

/// Account repository for CRUD operations.
#[derive(Debug)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account, resolving the bank by code and the
    /// customer by CPF.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::BankNotFound` or `AccountError::CustomerNotFound`
    /// when a referenced entity is missing, `AccountError::AlreadyExists` when
    /// the natural key is taken, or a database error.
    pub async fn create(
        &self,
        input: CreateAccountInput,
    ) -> Result<AccountWithRelations, AccountError> {
        let bank = banks::Entity::find()
            .filter(banks::Column::Code.eq(&input.bank_code))
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountError::BankNotFound(input.bank_code.clone()))?;

        let customer = customers::Entity::find()
            .filter(customers::Column::Cpf.eq(&input.customer_cpf))
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountError::CustomerNotFound(input.customer_cpf.clone()))?;

        let existing = accounts::Entity::find()
            .filter(accounts::Column::BankId.eq(bank.id))
            .filter(accounts::Column::Branch.eq(&input.branch))
            .filter(accounts::Column::AccountNumber.eq(&input.account_number))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(AccountError::AlreadyExists {
                bank_code: input.bank_code,
                branch: input.branch,
                account_number: input.account_number,
            });
        }

        let now = chrono::Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::new_v4()),
            bank_id: Set(bank.id),
            customer_id: Set(customer.id),
            branch: Set(input.branch),
            account_number: Set(input.account_number),
            balance: Set(input.initial_balance),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let account = account.insert(&self.db).await?;

        Ok(AccountWithRelations {
            account,
            bank,
            customer,
        })
    }

    /// Lists all accounts with their bank and owner, ordered by
    /// bank code, branch, and account number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<AccountWithRelations>, AccountError> {
        let rows = accounts::Entity::find()
            .find_also_related(banks::Entity)
            .order_by_asc(banks::Column::Code)
            .order_by_asc(accounts::Column::Branch)
            .order_by_asc(accounts::Column::AccountNumber)
            .all(&self.db)
            .await?;

        let mut result = Vec::with_capacity(rows.len());
        for (account, bank) in rows {
            let bank = bank.ok_or_else(|| {
                DbErr::RecordNotFound(format!("bank for account {}", account.id))
            })?;
            let customer = customers::Entity::find_by_id(account.customer_id)
                .one(&self.db)
                .await?
                .ok_or_else(|| {
                    DbErr::RecordNotFound(format!("customer for account {}", account.id))
                })?;
            result.push(AccountWithRelations {
                account,
                bank,
                customer,
            });
        }

        Ok(result)
    }

    /// Finds an account by its natural key (bank code, branch,
    /// account number).
    ///
    /// # Errors
    ///
    /// Returns `AccountError::NotFound` when no account matches, or a
    /// database error.
    pub async fn find_by_natural_key(
        &self,
        bank_code: &str,
        branch: &str,
        account_number: &str,
    ) -> Result<AccountWithRelations, AccountError> {
        let not_found = || AccountError::NotFound {
            bank_code: bank_code.to_string(),
            branch: branch.to_string(),
            account_number: account_number.to_string(),
        };

        let bank = banks::Entity::find()
            .filter(banks::Column::Code.eq(bank_code))
            .one(&self.db)
            .await?
            .ok_or_else(not_found)?;

        let account = accounts::Entity::find()
            .filter(accounts::Column::BankId.eq(bank.id))
            .filter(accounts::Column::Branch.eq(branch))
            .filter(accounts::Column::AccountNumber.eq(account_number))
            .one(&self.db)
            .await?
            .ok_or_else(not_found)?;

        let customer = customers::Entity::find_by_id(account.customer_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("customer for account {}", account.id))
            })?;

        Ok(AccountWithRelations {
            account,
            bank,
            customer,
        })
    }
}
