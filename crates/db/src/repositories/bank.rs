//! Bank repository for database operations.

use remita_shared::error::AppError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::banks;

/// Error types for bank operations.
#[derive(Debug, thiserror::Error)]
pub enum BankError {
    /// Bank code already registered.
    #[error("Bank code '{0}' already exists")]
    DuplicateCode(String),

    /// Bank not found by code.
    #[error("Bank with code '{0}' not found")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<BankError> for AppError {
    fn from(err: BankError) -> Self {
        match err {
            BankError::DuplicateCode(_) => Self::Conflict(err.to_string()),
            BankError::NotFound(_) => Self::NotFound(err.to_string()),
            BankError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// Input for creating a bank.
#[derive(Debug, Clone)]
pub struct CreateBankInput {
    /// Bank name.
    pub name: String,
    /// Bank code, 3 digits, unique.
    pub code: String,
}

/// Bank repository for CRUD operations.
#[derive(Debug)]
pub struct BankRepository {
    db: DatabaseConnection,
}

impl BankRepository {
    /// Creates a new bank repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new bank.
    ///
    /// # Errors
    ///
    /// Returns `BankError::DuplicateCode` if the code is already registered,
    /// or a database error.
    pub async fn create(&self, input: CreateBankInput) -> Result<banks::Model, BankError> {
        let existing = banks::Entity::find()
            .filter(banks::Column::Code.eq(&input.code))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(BankError::DuplicateCode(input.code));
        }

        let now = chrono::Utc::now().into();
        let bank = banks::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            code: Set(input.code),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(bank.insert(&self.db).await?)
    }

    /// Lists all banks ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<banks::Model>, BankError> {
        Ok(banks::Entity::find()
            .order_by_asc(banks::Column::Code)
            .all(&self.db)
            .await?)
    }

    /// Finds a bank by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<banks::Model>, BankError> {
        Ok(banks::Entity::find()
            .filter(banks::Column::Code.eq(code))
            .one(&self.db)
            .await?)
    }
}
