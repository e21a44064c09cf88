//! Journal repository. Journals are narrative entries against a ledger
//! group and never move a balance.

use chrono::{NaiveDate, Utc};
use khata_core::validation::{JournalLine, optional_text, validate_journal};
use khata_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{fetch_page, find_required};
use crate::entities::{
    journal_particulars, journals, ledger_groups, sea_orm_active_enums::JournalType,
};
use crate::error::StoreResult;

/// One narration line.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JournalParticularInput {
    /// Narration.
    #[validate(length(min = 1))]
    pub particular: String,
    /// Amount.
    pub amount: Decimal,
}

/// Body of a journal.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JournalInput {
    /// Journal date.
    pub date: NaiveDate,
    /// Ledger group the journal is written against.
    pub group_id: Uuid,
    /// Debit or credit.
    pub journal_type: JournalType,
    /// Free text.
    pub notes: Option<String>,
    /// Narration lines.
    #[serde(alias = "particularItems")]
    pub particulars: Vec<JournalParticularInput>,
}

/// A journal with its particulars.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalWithParticulars {
    /// Header.
    #[serde(flatten)]
    pub journal: journals::Model,
    /// Narration lines.
    pub particulars: Vec<journal_particulars::Model>,
}

fn check(input: &JournalInput) -> StoreResult<()> {
    let lines: Vec<JournalLine<'_>> = input
        .particulars
        .iter()
        .map(|p| JournalLine {
            particular: &p.particular,
            amount: p.amount,
        })
        .collect();
    validate_journal(&lines)?;
    Ok(())
}

fn particular_models(journal_id: Uuid, input: &JournalInput) -> Vec<journal_particulars::ActiveModel> {
    input
        .particulars
        .iter()
        .map(|p| journal_particulars::ActiveModel {
            id: Set(Uuid::new_v4()),
            journal_id: Set(journal_id),
            particular: Set(p.particular.trim().to_string()),
            amount: Set(p.amount),
        })
        .collect()
}

/// Journal repository.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a journal with its particulars.
    ///
    /// # Errors
    ///
    /// Returns a validation error or `StoreError::NotFound` for a missing
    /// group.
    pub async fn create(&self, input: JournalInput) -> StoreResult<JournalWithParticulars> {
        check(&input)?;
        find_required::<ledger_groups::Entity, _>(&self.db, input.group_id, "Group").await?;

        let now = Utc::now().into();
        let txn = self.db.begin().await?;
        let journal = journals::ActiveModel {
            id: Set(Uuid::new_v4()),
            date: Set(input.date),
            group_id: Set(input.group_id),
            journal_type: Set(input.journal_type),
            notes: Set(optional_text(input.notes.as_deref())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;
        journal_particulars::Entity::insert_many(particular_models(journal.id, &input))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!(journal_id = %journal.id, "journal created");
        self.get(journal.id).await
    }

    /// Lists journals, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<journals::Model>> {
        let query = journals::Entity::find()
            .order_by_desc(journals::Column::Date)
            .order_by_desc(journals::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Loads a journal with its particulars.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the journal does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<JournalWithParticulars> {
        let journal = find_required::<journals::Entity, _>(&self.db, id, "Journal").await?;
        let particulars = journal
            .find_related(journal_particulars::Entity)
            .all(&self.db)
            .await?;
        Ok(JournalWithParticulars {
            journal,
            particulars,
        })
    }

    /// Replaces a journal and its particulars.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or a validation error.
    pub async fn update(&self, id: Uuid, input: JournalInput) -> StoreResult<JournalWithParticulars> {
        let existing = find_required::<journals::Entity, _>(&self.db, id, "Journal").await?;
        check(&input)?;
        find_required::<ledger_groups::Entity, _>(&self.db, input.group_id, "Group").await?;

        let txn = self.db.begin().await?;
        let mut journal: journals::ActiveModel = existing.into();
        journal.date = Set(input.date);
        journal.group_id = Set(input.group_id);
        journal.journal_type = Set(input.journal_type);
        journal.notes = Set(optional_text(input.notes.as_deref()));
        journal.updated_at = Set(Utc::now().into());
        journal.update(&txn).await?;

        journal_particulars::Entity::delete_many()
            .filter(journal_particulars::Column::JournalId.eq(id))
            .exec(&txn)
            .await?;
        journal_particulars::Entity::insert_many(particular_models(id, &input))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!(journal_id = %id, "journal updated");
        self.get(id).await
    }

    /// Deletes a journal and its particulars.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the journal does not exist.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let existing = find_required::<journals::Entity, _>(&self.db, id, "Journal").await?;

        let txn = self.db.begin().await?;
        journal_particulars::Entity::delete_many()
            .filter(journal_particulars::Column::JournalId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;
        txn.commit().await?;

        tracing::info!(journal_id = %id, "journal deleted");
        Ok(())
    }
}
