//! Initial database migration.
//!
//! Creates the banks, customers, accounts, and transfer_logs tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(BANKS_SQL).await?;
        db.execute_unprepared(CUSTOMERS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(TRANSFER_LOGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const BANKS_SQL: &str = r"
CREATE TABLE banks (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    code CHAR(3) NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_banks_code_format CHECK (code ~ '^[0-9]{3}$')
);
";

const CUSTOMERS_SQL: &str = r"
CREATE TABLE customers (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    full_name VARCHAR(255) NOT NULL,
    cpf CHAR(11) NOT NULL UNIQUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_customers_cpf_format CHECK (cpf ~ '^[0-9]{11}$')
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    bank_id UUID NOT NULL REFERENCES banks(id),
    customer_id UUID NOT NULL REFERENCES customers(id),
    branch VARCHAR(10) NOT NULL,
    account_number VARCHAR(20) NOT NULL,
    balance NUMERIC(19, 2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_accounts_balance_non_negative CHECK (balance >= 0),
    CONSTRAINT uq_accounts_natural_key UNIQUE (bank_id, branch, account_number)
);

CREATE INDEX idx_accounts_customer ON accounts(customer_id);
";

const TRANSFER_LOGS_SQL: &str = r"
CREATE TABLE transfer_logs (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    source_account_id UUID NOT NULL REFERENCES accounts(id),
    destination_account_id UUID NOT NULL REFERENCES accounts(id),
    amount NUMERIC(19, 2) NOT NULL,
    commission NUMERIC(19, 2) NOT NULL DEFAULT 0,
    performed_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_transfer_logs_amount_positive CHECK (amount > 0),
    CONSTRAINT chk_transfer_logs_commission_non_negative CHECK (commission >= 0),
    CONSTRAINT chk_transfer_logs_distinct_accounts
        CHECK (source_account_id <> destination_account_id)
);

CREATE INDEX idx_transfer_logs_source ON transfer_logs(source_account_id);
CREATE INDEX idx_transfer_logs_destination ON transfer_logs(destination_account_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS transfer_logs CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP TABLE IF EXISTS customers CASCADE;
DROP TABLE IF EXISTS banks CASCADE;
";
