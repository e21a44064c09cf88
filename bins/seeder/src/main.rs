//! Seeds a fresh Khata database.
//!
//! Creates the company record and the first admin member so someone can log
//! in. Running it again leaves existing data alone.
//!
//! Environment:
//! - `DATABASE_URL` (required)
//! - `KHATA_SEED_COMPANY_NAME` (default `Khata Traders`)
//! - `KHATA_SEED_COMPANY_OPENING_BAL` (default `0`)
//! - `KHATA_SEED_ADMIN_USERNAME` (default `admin`)
//! - `KHATA_SEED_ADMIN_NAME` (default `Administrator`)
//! - `KHATA_SEED_ADMIN_EMAIL` (default `admin@khata.local`)
//! - `KHATA_SEED_ADMIN_PHONE` (default `9800000000`)
//! - `KHATA_SEED_ADMIN_PASSWORD` (required)
//!
//! Usage: cargo run --bin seeder

use std::str::FromStr;

use anyhow::{Context, bail};
use khata_db::entities::sea_orm_active_enums::MemberRole;
use khata_db::repositories::{CompanyInput, CreateMemberInput};
use khata_db::{CompanyRepository, MemberRepository};
use khata_shared::config::DatabaseConfig;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Seed values read from the environment.
#[derive(Debug)]
struct SeedSettings {
    company_name: String,
    company_opening_bal: Decimal,
    admin_username: String,
    admin_name: String,
    admin_email: String,
    admin_phone: String,
    admin_password: String,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl SeedSettings {
    fn from_env() -> anyhow::Result<Self> {
        let opening = var_or("KHATA_SEED_COMPANY_OPENING_BAL", "0");
        let company_opening_bal = Decimal::from_str(&opening)
            .with_context(|| format!("KHATA_SEED_COMPANY_OPENING_BAL is not a number: {opening}"))?;

        let admin_password = var_or("KHATA_SEED_ADMIN_PASSWORD", "");
        if admin_password.is_empty() {
            bail!("KHATA_SEED_ADMIN_PASSWORD must be set");
        }

        Ok(Self {
            company_name: var_or("KHATA_SEED_COMPANY_NAME", "Khata Traders"),
            company_opening_bal,
            admin_username: var_or("KHATA_SEED_ADMIN_USERNAME", "admin"),
            admin_name: var_or("KHATA_SEED_ADMIN_NAME", "Administrator"),
            admin_email: var_or("KHATA_SEED_ADMIN_EMAIL", "admin@khata.local"),
            admin_phone: var_or("KHATA_SEED_ADMIN_PHONE", "9800000000"),
            admin_password,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = SeedSettings::from_env()?;
    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = khata_db::connect(&DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 1,
    })
    .await
    .context("Failed to connect to database")?;

    println!("Seeding company record...");
    seed_company(&db, &settings).await?;

    println!("Seeding admin member...");
    seed_admin(&db, &settings).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_company(db: &DatabaseConnection, settings: &SeedSettings) -> anyhow::Result<()> {
    let repo = CompanyRepository::new(db.clone());
    if repo.find().await?.is_some() {
        println!("  Company record already exists, skipping...");
        return Ok(());
    }

    let company = repo
        .create(CompanyInput {
            company_name: settings.company_name.clone(),
            email: None,
            phone_number: None,
            address: None,
            gst_no: None,
            opening_bal: Some(settings.company_opening_bal),
        })
        .await
        .context("Failed to create company record")?;
    println!("  Created {} with opening balance {}", company.company_name, company.opening_bal);
    Ok(())
}

async fn seed_admin(db: &DatabaseConnection, settings: &SeedSettings) -> anyhow::Result<()> {
    let repo = MemberRepository::new(db.clone());
    if repo.admin_exists().await? {
        println!("  An admin member already exists, skipping...");
        return Ok(());
    }

    let admin = repo
        .create(CreateMemberInput {
            username: settings.admin_username.clone(),
            name: settings.admin_name.clone(),
            email: settings.admin_email.clone(),
            phone_number: settings.admin_phone.clone(),
            emergency_number: None,
            password: settings.admin_password.clone(),
            role: MemberRole::Admin,
            address: None,
            image: None,
            opening_bal: None,
            company_opening_bal: None,
            joining_date: None,
            salary: None,
        })
        .await
        .context("Failed to create admin member")?;
    println!("  Created admin '{}'", admin.username);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_need_a_password() {
        temp_env::with_var("KHATA_SEED_ADMIN_PASSWORD", None::<&str>, || {
            assert!(SeedSettings::from_env().is_err());
        });
    }

    #[test]
    fn test_settings_defaults_and_overrides() {
        temp_env::with_vars(
            [
                ("KHATA_SEED_ADMIN_PASSWORD", Some("changeme")),
                ("KHATA_SEED_COMPANY_OPENING_BAL", Some("1500.75")),
                ("KHATA_SEED_ADMIN_USERNAME", None),
            ],
            || {
                let settings = SeedSettings::from_env().unwrap();
                assert_eq!(settings.admin_username, "admin");
                assert_eq!(settings.company_opening_bal, Decimal::new(150_075, 2));
            },
        );
    }

    #[test]
    fn test_settings_reject_bad_opening_balance() {
        temp_env::with_vars(
            [
                ("KHATA_SEED_ADMIN_PASSWORD", Some("changeme")),
                ("KHATA_SEED_COMPANY_OPENING_BAL", Some("lots")),
            ],
            || {
                assert!(SeedSettings::from_env().is_err());
            },
        );
    }
}
