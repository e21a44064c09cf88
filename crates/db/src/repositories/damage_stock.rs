//! Damaged stock repository.

use chrono::{NaiveDate, Utc};
use khata_core::validation::{optional_text, validate_damage_stock};
use khata_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_unique, fetch_page, find_required};
use crate::entities::{damage_stocks, items};
use crate::error::StoreResult;

/// Body of a damage record.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DamageStockInput {
    /// Damage reference, unique.
    #[validate(length(min = 1))]
    pub damage_id: String,
    /// Date the damage was found.
    pub date: NaiveDate,
    /// Damaged item.
    pub item_id: Uuid,
    /// Units damaged.
    pub quantity: i32,
    /// Free text.
    pub notes: Option<String>,
}

/// Damaged stock repository.
#[derive(Debug, Clone)]
pub struct DamageStockRepository {
    db: DatabaseConnection,
}

impl DamageStockRepository {
    /// Creates a new damage stock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check(&self, input: &DamageStockInput, except: Option<Uuid>) -> StoreResult<String> {
        let damage_id = validate_damage_stock(&input.damage_id, input.quantity)?;
        let mut duplicate =
            damage_stocks::Entity::find().filter(damage_stocks::Column::DamageId.eq(&damage_id));
        if let Some(id) = except {
            duplicate = duplicate.filter(damage_stocks::Column::Id.ne(id));
        }
        ensure_unique(&self.db, duplicate, "Damage ID").await?;
        find_required::<items::Entity, _>(&self.db, input.item_id, "Item").await?;
        Ok(damage_id)
    }

    /// Records damaged stock.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `StoreError::Duplicate` or
    /// `StoreError::NotFound` for a missing item.
    pub async fn create(&self, input: DamageStockInput) -> StoreResult<damage_stocks::Model> {
        let damage_id = self.check(&input, None).await?;
        let now = Utc::now().into();
        let record = damage_stocks::ActiveModel {
            id: Set(Uuid::new_v4()),
            damage_id: Set(damage_id),
            date: Set(input.date),
            item_id: Set(input.item_id),
            quantity: Set(input.quantity),
            notes: Set(optional_text(input.notes.as_deref())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(damage_stock_id = %record.id, "damage stock created");
        Ok(record)
    }

    /// Lists damage records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<damage_stocks::Model>> {
        let query = damage_stocks::Entity::find()
            .order_by_desc(damage_stocks::Column::Date)
            .order_by_desc(damage_stocks::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a damage record by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the record does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<damage_stocks::Model> {
        find_required::<damage_stocks::Entity, _>(&self.db, id, "Damage stock").await
    }

    /// Replaces a damage record.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn update(&self, id: Uuid, input: DamageStockInput) -> StoreResult<damage_stocks::Model> {
        let existing = self.get(id).await?;
        let damage_id = self.check(&input, Some(id)).await?;

        let mut record: damage_stocks::ActiveModel = existing.into();
        record.damage_id = Set(damage_id);
        record.date = Set(input.date);
        record.item_id = Set(input.item_id);
        record.quantity = Set(input.quantity);
        record.notes = Set(optional_text(input.notes.as_deref()));
        record.updated_at = Set(Utc::now().into());
        Ok(record.update(&self.db).await?)
    }

    /// Deletes a damage record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the record does not exist.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        tracing::info!(damage_stock_id = %id, "damage stock deleted");
        Ok(())
    }
}
