//! Bank account repository.
//!
//! `opening_bal` starts as the balance entered by the user and then runs:
//! bank-settled documents and bank entries move it.

use chrono::Utc;
use khata_core::validation::{money, required_text};
use khata_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_unique, fetch_page, find_required};
use crate::entities::banks;
use crate::error::StoreResult;

/// Input for creating a bank account.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BankInput {
    /// Name the account is held in.
    #[validate(length(min = 1))]
    pub account_name: String,
    /// Bank name.
    #[validate(length(min = 1))]
    pub bank_name: String,
    /// Account number, unique.
    #[validate(length(min = 1))]
    pub account_no: String,
    /// Balance when the account was added.
    pub opening_bal: Option<Decimal>,
}

/// Partial update of a bank account.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBankInput {
    /// Name the account is held in.
    #[validate(length(min = 1))]
    pub account_name: Option<String>,
    /// Bank name.
    #[validate(length(min = 1))]
    pub bank_name: Option<String>,
    /// Account number.
    #[validate(length(min = 1))]
    pub account_no: Option<String>,
    /// Overwrites the running balance.
    pub opening_bal: Option<Decimal>,
}

/// Bank account repository.
#[derive(Debug, Clone)]
pub struct BankRepository {
    db: DatabaseConnection,
}

impl BankRepository {
    /// Creates a new bank repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a bank account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` for a taken account number.
    pub async fn create(&self, input: BankInput) -> StoreResult<banks::Model> {
        let account_no = required_text("accountNo", &input.account_no)?;
        ensure_unique(
            &self.db,
            banks::Entity::find().filter(banks::Column::AccountNo.eq(&account_no)),
            "Account number",
        )
        .await?;

        let now = Utc::now().into();
        let bank = banks::ActiveModel {
            id: Set(Uuid::new_v4()),
            account_name: Set(required_text("accountName", &input.account_name)?),
            bank_name: Set(required_text("bankName", &input.bank_name)?),
            account_no: Set(account_no),
            opening_bal: Set(money("openingBal", input.opening_bal.unwrap_or_default())?),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(bank_id = %bank.id, "bank account created");
        Ok(bank)
    }

    /// Lists bank accounts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<banks::Model>> {
        let query = banks::Entity::find().order_by_desc(banks::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a bank account by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<banks::Model> {
        find_required::<banks::Entity, _>(&self.db, id, "Bank").await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::Duplicate`.
    pub async fn update(&self, id: Uuid, input: UpdateBankInput) -> StoreResult<banks::Model> {
        let mut bank: banks::ActiveModel = self.get(id).await?.into();

        if let Some(account_no) = input.account_no {
            let account_no = required_text("accountNo", &account_no)?;
            ensure_unique(
                &self.db,
                banks::Entity::find()
                    .filter(banks::Column::AccountNo.eq(&account_no))
                    .filter(banks::Column::Id.ne(id)),
                "Account number",
            )
            .await?;
            bank.account_no = Set(account_no);
        }
        if let Some(account_name) = input.account_name {
            bank.account_name = Set(required_text("accountName", &account_name)?);
        }
        if let Some(bank_name) = input.bank_name {
            bank.bank_name = Set(required_text("bankName", &bank_name)?);
        }
        if let Some(opening_bal) = input.opening_bal {
            let opening_bal = money("openingBal", opening_bal)?;
            tracing::warn!(bank_id = %id, %opening_bal, "bank balance overwritten");
            bank.opening_bal = Set(opening_bal);
        }
        bank.updated_at = Set(Utc::now().into());

        Ok(bank.update(&self.db).await?)
    }

    /// Deletes a bank account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` while documents reference it.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        tracing::info!(bank_id = %id, "bank account deleted");
        Ok(())
    }
}
