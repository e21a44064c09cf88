//! Database migration runner for Khata.
//!
//! Usage:
//!   migrator up      - Apply pending migrations
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show which migrations have run
//!   migrator fresh   - Drop every table and migrate from scratch
//!
//! The database URL comes from `DATABASE_URL`.

use sea_orm_migration::prelude::*;
use khata_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    cli::run_cli(Migrator).await;
}
