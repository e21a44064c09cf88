//! Bank entry repository: cash deposited into or withdrawn from a bank.

use chrono::{NaiveDate, Utc};
use khata_core::settlement::{EffectPlan, Posting};
use khata_core::validation::{optional_text, validate_bank_entry};
use khata_shared::types::{BankId, PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::balance::apply_plan;
use super::{ensure_unique, fetch_page, find_required};
use crate::entities::{bank_entries, banks, sea_orm_active_enums::AmountType};
use crate::error::StoreResult;

/// Body of a bank entry.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BankEntryInput {
    /// Internal transaction number, unique.
    #[validate(length(min = 1))]
    pub trxn_number: String,
    /// Entry date.
    pub date: NaiveDate,
    /// Bank on the other side of the company cash balance.
    pub bank_id: Uuid,
    /// Amount moved.
    pub amount: Decimal,
    /// Deposit or withdrawal.
    pub amount_type: AmountType,
    /// Bank's own transaction reference.
    #[validate(length(min = 1))]
    pub trxn_id: String,
    /// Free text.
    pub notes: Option<String>,
}

fn posting_of(bank_id: Uuid, amount_type: AmountType, amount: Decimal) -> StoreResult<Posting> {
    Ok(Posting::bank_transfer(
        BankId::from_uuid(bank_id),
        amount_type.into(),
        amount,
    )?)
}

/// Bank entry repository.
#[derive(Debug, Clone)]
pub struct BankEntryRepository {
    db: DatabaseConnection,
}

impl BankEntryRepository {
    /// Creates a new bank entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check(&self, input: &BankEntryInput, except: Option<Uuid>) -> StoreResult<(String, String)> {
        let (trxn_number, trxn_id) =
            validate_bank_entry(&input.trxn_number, &input.trxn_id, input.amount)?;

        let mut duplicate =
            bank_entries::Entity::find().filter(bank_entries::Column::TrxnNumber.eq(&trxn_number));
        if let Some(id) = except {
            duplicate = duplicate.filter(bank_entries::Column::Id.ne(id));
        }
        ensure_unique(&self.db, duplicate, "Transaction number").await?;
        find_required::<banks::Entity, _>(&self.db, input.bank_id, "Bank").await?;

        Ok((trxn_number, trxn_id))
    }

    /// Records a bank entry and moves cash between the company and the bank.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `StoreError::Duplicate` for a reused
    /// transaction number or `StoreError::NotFound` for a missing bank or
    /// company record.
    pub async fn create(&self, input: BankEntryInput) -> StoreResult<bank_entries::Model> {
        let (trxn_number, trxn_id) = self.check(&input, None).await?;
        let plan = EffectPlan::post(&posting_of(input.bank_id, input.amount_type, input.amount)?);
        let now = Utc::now().into();

        let txn = self.db.begin().await?;
        let entry = bank_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            trxn_number: Set(trxn_number),
            date: Set(input.date),
            bank_id: Set(input.bank_id),
            amount: Set(input.amount),
            amount_type: Set(input.amount_type),
            trxn_id: Set(trxn_id),
            notes: Set(optional_text(input.notes.as_deref())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;
        apply_plan(&txn, &plan).await?;
        txn.commit().await?;

        tracing::info!(
            entry_id = %entry.id,
            bank_id = %entry.bank_id,
            amount_type = ?entry.amount_type,
            amount = %entry.amount,
            "bank entry created"
        );
        Ok(entry)
    }

    /// Lists bank entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<bank_entries::Model>> {
        let query = bank_entries::Entity::find()
            .order_by_desc(bank_entries::Column::Date)
            .order_by_desc(bank_entries::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a bank entry by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the entry does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<bank_entries::Model> {
        find_required::<bank_entries::Entity, _>(&self.db, id, "Bank entry").await
    }

    /// Replaces a bank entry and moves balances by the difference.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn update(&self, id: Uuid, input: BankEntryInput) -> StoreResult<bank_entries::Model> {
        let (trxn_number, trxn_id) = self.check(&input, Some(id)).await?;
        let new = posting_of(input.bank_id, input.amount_type, input.amount)?;

        let txn = self.db.begin().await?;
        let existing = find_required::<bank_entries::Entity, _>(&txn, id, "Bank entry").await?;
        let old = posting_of(existing.bank_id, existing.amount_type, existing.amount)?;
        let plan = EffectPlan::repost(&old, &new);
        let mut entry: bank_entries::ActiveModel = existing.into();
        entry.trxn_number = Set(trxn_number);
        entry.date = Set(input.date);
        entry.bank_id = Set(input.bank_id);
        entry.amount = Set(input.amount);
        entry.amount_type = Set(input.amount_type);
        entry.trxn_id = Set(trxn_id);
        entry.notes = Set(optional_text(input.notes.as_deref()));
        entry.updated_at = Set(Utc::now().into());
        let entry = entry.update(&txn).await?;
        apply_plan(&txn, &plan).await?;
        txn.commit().await?;

        tracing::info!(entry_id = %id, "bank entry updated");
        Ok(entry)
    }

    /// Deletes a bank entry and moves the cash back.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the entry does not exist.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let txn = self.db.begin().await?;
        let existing = find_required::<bank_entries::Entity, _>(&txn, id, "Bank entry").await?;
        let plan = EffectPlan::unpost(&posting_of(
            existing.bank_id,
            existing.amount_type,
            existing.amount,
        )?);

        existing.delete(&txn).await?;
        apply_plan(&txn, &plan).await?;
        txn.commit().await?;

        tracing::info!(entry_id = %id, "bank entry deleted");
        Ok(())
    }
}
