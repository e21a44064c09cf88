//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//! - Application of settlement plans to stored balances

pub mod entities;
pub mod error;
pub mod migration;
pub mod repositories;

pub use error::{StoreError, StoreResult};
pub use repositories::{
    BalanceRepository, BankEntryRepository, BankRepository, CategoryRepository,
    CompanyRepository, DamageStockRepository, GroupRepository, ItemRepository, JournalRepository,
    MemberRepository, PartyRepository, PaymentRepository, ReceiptRepository, RouteRepository,
    TaxRepository, TradeRepository, VehicleRepository, VehicleStockRepository,
};

use khata_shared::config::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool sized from configuration.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(false);
    Database::connect(options).await
}
