//! Database seeder for Remita development and testing.
//!
//! Seeds two banks, two customers, and three accounts so transfers can
//! be exercised immediately: two accounts at the same bank plus one at
//! the other bank for inter-bank (commission-charging) transfers.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use remita_db::entities::{accounts, banks, customers};

/// Fixed IDs so re-running the seeder is a no-op.
const BANK_ALFA_ID: &str = "00000000-0000-0000-0000-000000000001";
const BANK_BETA_ID: &str = "00000000-0000-0000-0000-000000000002";
const CUSTOMER_ANA_ID: &str = "00000000-0000-0000-0000-000000000011";
const CUSTOMER_BRUNO_ID: &str = "00000000-0000-0000-0000-000000000012";
const ACCOUNT_ANA_ALFA_ID: &str = "00000000-0000-0000-0000-000000000021";
const ACCOUNT_BRUNO_ALFA_ID: &str = "00000000-0000-0000-0000-000000000022";
const ACCOUNT_BRUNO_BETA_ID: &str = "00000000-0000-0000-0000-000000000023";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = remita_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding banks...");
    seed_bank(&db, BANK_ALFA_ID, "Banco Alfa", "001").await;
    seed_bank(&db, BANK_BETA_ID, "Banco Beta", "260").await;

    println!("Seeding customers...");
    seed_customer(&db, CUSTOMER_ANA_ID, "Ana Souza", "12345678901").await;
    seed_customer(&db, CUSTOMER_BRUNO_ID, "Bruno Lima", "98765432109").await;

    println!("Seeding accounts...");
    seed_account(
        &db,
        ACCOUNT_ANA_ALFA_ID,
        BANK_ALFA_ID,
        CUSTOMER_ANA_ID,
        "0001",
        "1010-0",
        Decimal::new(500_000, 2), // 5000.00
    )
    .await;
    seed_account(
        &db,
        ACCOUNT_BRUNO_ALFA_ID,
        BANK_ALFA_ID,
        CUSTOMER_BRUNO_ID,
        "0001",
        "2020-0",
        Decimal::new(100_000, 2), // 1000.00
    )
    .await;
    seed_account(
        &db,
        ACCOUNT_BRUNO_BETA_ID,
        BANK_BETA_ID,
        CUSTOMER_BRUNO_ID,
        "0001",
        "3030-0",
        Decimal::ZERO,
    )
    .await;

    println!("Seeding complete!");
}

fn parse_id(id: &str) -> Uuid {
    Uuid::parse_str(id).expect("seed ID must be a valid UUID")
}

async fn seed_bank(db: &DatabaseConnection, id: &str, name: &str, code: &str) {
    let id = parse_id(id);
    if banks::Entity::find_by_id(id).one(db).await.ok().flatten().is_some() {
        println!("  Bank {code} already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let bank = banks::ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        code: Set(code.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    bank.insert(db).await.expect("Failed to seed bank");
    println!("  Bank {name} ({code}) created");
}

async fn seed_customer(db: &DatabaseConnection, id: &str, full_name: &str, cpf: &str) {
    let id = parse_id(id);
    if customers::Entity::find_by_id(id).one(db).await.ok().flatten().is_some() {
        println!("  Customer {full_name} already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let customer = customers::ActiveModel {
        id: Set(id),
        full_name: Set(full_name.to_string()),
        cpf: Set(cpf.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    customer.insert(db).await.expect("Failed to seed customer");
    println!("  Customer {full_name} created");
}

async fn seed_account(
    db: &DatabaseConnection,
    id: &str,
    bank_id: &str,
    customer_id: &str,
    branch: &str,
    account_number: &str,
    balance: Decimal,
) {
    let id = parse_id(id);
    if accounts::Entity::find_by_id(id).one(db).await.ok().flatten().is_some() {
        println!("  Account {branch}/{account_number} already exists, skipping...");
        return;
    }

    let now = Utc::now().into();
    let account = accounts::ActiveModel {
        id: Set(id),
        bank_id: Set(parse_id(bank_id)),
        customer_id: Set(parse_id(customer_id)),
        branch: Set(branch.to_string()),
        account_number: Set(account_number.to_string()),
        balance: Set(balance),
        created_at: Set(now),
        updated_at: Set(now),
    };
    account.insert(db).await.expect("Failed to seed account");
    println!("  Account {branch}/{account_number} created with balance {balance}");
}
