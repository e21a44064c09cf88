//! Shared fixtures for repository integration tests.
//!
//! Every test gets its own in-memory SQLite database migrated with the real
//! migrator. The pool holds a single connection so the database lives as long
//! as the pool.

#![allow(dead_code)]

use chrono::NaiveDate;
use khata_db::entities::sea_orm_active_enums::{BalanceType, ItemType, PartyType};
use khata_db::migration::{Migrator, MigratorTrait};
use khata_db::repositories::{
    BankInput, CategoryInput, CompanyInput, ItemInput, PartyInput,
};
use khata_db::{
    BankRepository, CategoryRepository, CompanyRepository, ItemRepository, PartyRepository,
};
use rust_decimal::Decimal;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use uuid::Uuid;

pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");
    db
}

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).expect("valid date")
}

pub async fn seed_company(db: &DatabaseConnection, opening: Decimal) {
    CompanyRepository::new(db.clone())
        .create(CompanyInput {
            company_name: "Khata Traders".to_string(),
            email: None,
            phone_number: None,
            address: None,
            gst_no: None,
            opening_bal: Some(opening),
        })
        .await
        .expect("Failed to create company");
}

pub async fn seed_bank(db: &DatabaseConnection, account_no: &str, opening: Decimal) -> Uuid {
    BankRepository::new(db.clone())
        .create(BankInput {
            account_name: "Khata Traders".to_string(),
            bank_name: "City Bank".to_string(),
            account_no: account_no.to_string(),
            opening_bal: Some(opening),
        })
        .await
        .expect("Failed to create bank")
        .id
}

pub async fn seed_party(db: &DatabaseConnection, phone: &str) -> Uuid {
    PartyRepository::new(db.clone())
        .create(PartyInput {
            party_name: format!("Party {phone}"),
            phone_number: phone.to_string(),
            email: None,
            assigned_route_id: None,
            address: None,
            latitude: None,
            longitude: None,
            party_type: PartyType::SaleAndPurchase,
            route_priority: None,
            as_of_date: None,
            opening_bal: None,
            balance_type: BalanceType::Receive,
            status: None,
            group_id: None,
        })
        .await
        .expect("Failed to create party")
        .id
}

pub async fn seed_item(db: &DatabaseConnection, code: &str) -> Uuid {
    let category = CategoryRepository::new(db.clone())
        .create(CategoryInput {
            category_name: format!("Category {code}"),
        })
        .await
        .expect("Failed to create category");

    ItemRepository::new(db.clone())
        .create(ItemInput {
            item_code: code.to_string(),
            item_name: format!("Item {code}"),
            item_type: ItemType::Product,
            category_id: category.id,
            purchase_rate: Decimal::new(40, 0),
            sale_rate: Decimal::new(50, 0),
            mrp: None,
            opening_stock: Some(10),
            min_stock: None,
            tax_id: None,
            as_of_date: None,
        })
        .await
        .expect("Failed to create item")
        .id
}
