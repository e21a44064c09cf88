//! Item (product and service) repository.

use chrono::{NaiveDate, Utc};
use khata_core::validation::{ValidationError, non_negative, required_text};
use khata_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_exists, ensure_unique, fetch_page, find_required};
use crate::entities::{categories, items, sea_orm_active_enums::ItemType, taxes};
use crate::error::StoreResult;

/// Input for creating an item.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    /// Unique item code.
    #[validate(length(min = 1))]
    pub item_code: String,
    /// Item name.
    #[validate(length(min = 1))]
    pub item_name: String,
    /// Product or service.
    pub item_type: ItemType,
    /// Category the item belongs to.
    pub category_id: Uuid,
    /// Default purchase rate.
    pub purchase_rate: Decimal,
    /// Default sale rate.
    pub sale_rate: Decimal,
    /// Printed retail price.
    pub mrp: Option<Decimal>,
    /// Stock when the item was added.
    pub opening_stock: Option<i32>,
    /// Reorder level.
    pub min_stock: Option<i32>,
    /// Tax applied on sale.
    pub tax_id: Option<Uuid>,
    /// Date the opening stock refers to.
    pub as_of_date: Option<NaiveDate>,
}

/// Partial update of an item.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemInput {
    /// Item code.
    #[validate(length(min = 1))]
    pub item_code: Option<String>,
    /// Item name.
    #[validate(length(min = 1))]
    pub item_name: Option<String>,
    /// Product or service.
    pub item_type: Option<ItemType>,
    /// Category.
    pub category_id: Option<Uuid>,
    /// Purchase rate.
    pub purchase_rate: Option<Decimal>,
    /// Sale rate.
    pub sale_rate: Option<Decimal>,
    /// Retail price.
    pub mrp: Option<Decimal>,
    /// Opening stock.
    pub opening_stock: Option<i32>,
    /// Reorder level.
    pub min_stock: Option<i32>,
    /// Tax.
    pub tax_id: Option<Uuid>,
    /// Opening stock date.
    pub as_of_date: Option<NaiveDate>,
}

fn non_negative_stock(field: &'static str, value: i32) -> StoreResult<i32> {
    if value < 0 {
        return Err(ValidationError::Negative(field).into());
    }
    Ok(value)
}

/// Item repository.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    db: DatabaseConnection,
}

impl ItemRepository {
    /// Creates a new item repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an item.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` for a taken code and
    /// `StoreError::NotFound` for a missing category or tax.
    pub async fn create(&self, input: ItemInput) -> StoreResult<items::Model> {
        let item_code = required_text("itemCode", &input.item_code)?;
        ensure_unique(
            &self.db,
            items::Entity::find().filter(items::Column::ItemCode.eq(&item_code)),
            "Item code",
        )
        .await?;
        find_required::<categories::Entity, _>(&self.db, input.category_id, "Category").await?;
        ensure_exists::<taxes::Entity, _>(&self.db, input.tax_id, "Tax").await?;

        let now = Utc::now().into();
        let item = items::ActiveModel {
            id: Set(Uuid::new_v4()),
            item_code: Set(item_code),
            item_name: Set(required_text("itemName", &input.item_name)?),
            item_type: Set(input.item_type),
            category_id: Set(input.category_id),
            purchase_rate: Set(non_negative("purchaseRate", input.purchase_rate)?),
            sale_rate: Set(non_negative("saleRate", input.sale_rate)?),
            mrp: Set(non_negative("mrp", input.mrp.unwrap_or_default())?),
            opening_stock: Set(non_negative_stock("openingStock", input.opening_stock.unwrap_or(0))?),
            min_stock: Set(non_negative_stock("minStock", input.min_stock.unwrap_or(0))?),
            tax_id: Set(input.tax_id),
            as_of_date: Set(input.as_of_date),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(item_id = %item.id, "item created");
        Ok(item)
    }

    /// Lists items, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<items::Model>> {
        let query = items::Entity::find().order_by_desc(items::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds an item by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the item does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<items::Model> {
        find_required::<items::Entity, _>(&self.db, id, "Item").await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, `StoreError::Duplicate` or a validation
    /// error.
    pub async fn update(&self, id: Uuid, input: UpdateItemInput) -> StoreResult<items::Model> {
        let mut item: items::ActiveModel = self.get(id).await?.into();

        if let Some(item_code) = input.item_code {
            let item_code = required_text("itemCode", &item_code)?;
            ensure_unique(
                &self.db,
                items::Entity::find()
                    .filter(items::Column::ItemCode.eq(&item_code))
                    .filter(items::Column::Id.ne(id)),
                "Item code",
            )
            .await?;
            item.item_code = Set(item_code);
        }
        if let Some(name) = input.item_name {
            item.item_name = Set(required_text("itemName", &name)?);
        }
        if let Some(item_type) = input.item_type {
            item.item_type = Set(item_type);
        }
        if let Some(category_id) = input.category_id {
            find_required::<categories::Entity, _>(&self.db, category_id, "Category").await?;
            item.category_id = Set(category_id);
        }
        if let Some(rate) = input.purchase_rate {
            item.purchase_rate = Set(non_negative("purchaseRate", rate)?);
        }
        if let Some(rate) = input.sale_rate {
            item.sale_rate = Set(non_negative("saleRate", rate)?);
        }
        if let Some(mrp) = input.mrp {
            item.mrp = Set(non_negative("mrp", mrp)?);
        }
        if let Some(stock) = input.opening_stock {
            item.opening_stock = Set(non_negative_stock("openingStock", stock)?);
        }
        if let Some(stock) = input.min_stock {
            item.min_stock = Set(non_negative_stock("minStock", stock)?);
        }
        if input.tax_id.is_some() {
            ensure_exists::<taxes::Entity, _>(&self.db, input.tax_id, "Tax").await?;
            item.tax_id = Set(input.tax_id);
        }
        if input.as_of_date.is_some() {
            item.as_of_date = Set(input.as_of_date);
        }
        item.updated_at = Set(Utc::now().into());

        Ok(item.update(&self.db).await?)
    }

    /// Deletes an item.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` while document lines reference it.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        tracing::info!(item_id = %id, "item deleted");
        Ok(())
    }
}
