//! Customer repository for database operations.

use remita_shared::error::AppError;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::customers;

/// Error types for customer operations.
#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    /// CPF already registered.
    #[error("Customer with CPF '{0}' already exists")]
    DuplicateCpf(String),

    /// Customer not found by CPF.
    #[error("Customer with CPF '{0}' not found")]
    NotFound(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<CustomerError> for AppError {
    fn from(err: CustomerError) -> Self {
        match err {
            CustomerError::DuplicateCpf(_) => Self::Conflict(err.to_string()),
            CustomerError::NotFound(_) => Self::NotFound(err.to_string()),
            CustomerError::Database(db) => Self::Database(db.to_string()),
        }
    }
}

/// Input for creating a customer.
#[derive(Debug, Clone)]
pub struct CreateCustomerInput {
    /// Customer full name.
    pub full_name: String,
    /// CPF, 11 digits, unique.
    pub cpf: String,
}

/// Customer repository for CRUD operations.
#[derive(Debug)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new customer.
    ///
    /// # Errors
    ///
    /// Returns `CustomerError::DuplicateCpf` if the CPF is already registered,
    /// or a database error.
    pub async fn create(
        &self,
        input: CreateCustomerInput,
    ) -> Result<customers::Model, CustomerError> {
        let existing = customers::Entity::find()
            .filter(customers::Column::Cpf.eq(&input.cpf))
            .count(&self.db)
            .await?;
        if existing > 0 {
            return Err(CustomerError::DuplicateCpf(input.cpf));
        }

        let now = chrono::Utc::now().into();
        let customer = customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(input.full_name),
            cpf: Set(input.cpf),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(customer.insert(&self.db).await?)
    }

    /// Lists all customers ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<customers::Model>, CustomerError> {
        Ok(customers::Entity::find()
            .order_by_asc(customers::Column::FullName)
            .all(&self.db)
            .await?)
    }

    /// Finds a customer by CPF.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<customers::Model>, CustomerError> {
        Ok(customers::Entity::find()
            .filter(customers::Column::Cpf.eq(cpf))
            .one(&self.db)
            .await?)
    }
}
