//! Vehicle stock repository: goods loaded onto or unloaded from a vehicle.

use chrono::{NaiveDate, Utc};
use khata_core::validation::validate_vehicle_stock;
use khata_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{ensure_unique, fetch_page, find_required};
use crate::entities::{
    items, sea_orm_active_enums::StockType, vehicle_stock_lines, vehicle_stocks, vehicles,
};
use crate::error::StoreResult;

/// One stock line.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStockLineInput {
    /// Item moved.
    pub item_id: Uuid,
    /// Units moved.
    pub quantity: i32,
}

/// Body of a vehicle stock movement.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStockInput {
    /// Stock number, unique.
    #[validate(length(min = 1))]
    pub stock_no: String,
    /// Vehicle loaded or unloaded.
    pub vehicle_id: Uuid,
    /// Movement date.
    pub date: NaiveDate,
    /// In or out.
    pub stock_type: StockType,
    /// Lines.
    #[serde(alias = "stockItems")]
    pub items: Vec<VehicleStockLineInput>,
}

/// A stock movement with its lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleStockWithLines {
    /// Header.
    #[serde(flatten)]
    pub stock: vehicle_stocks::Model,
    /// Lines.
    pub items: Vec<vehicle_stock_lines::Model>,
}

fn line_models(stock_id: Uuid, input: &VehicleStockInput) -> Vec<vehicle_stock_lines::ActiveModel> {
    input
        .items
        .iter()
        .map(|line| vehicle_stock_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            vehicle_stock_id: Set(stock_id),
            item_id: Set(line.item_id),
            quantity: Set(line.quantity),
        })
        .collect()
}

/// Vehicle stock repository.
#[derive(Debug, Clone)]
pub struct VehicleStockRepository {
    db: DatabaseConnection,
}

impl VehicleStockRepository {
    /// Creates a new vehicle stock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check(&self, input: &VehicleStockInput, except: Option<Uuid>) -> StoreResult<String> {
        let quantities: Vec<i32> = input.items.iter().map(|line| line.quantity).collect();
        let stock_no = validate_vehicle_stock(&input.stock_no, &quantities)?;

        let mut duplicate =
            vehicle_stocks::Entity::find().filter(vehicle_stocks::Column::StockNo.eq(&stock_no));
        if let Some(id) = except {
            duplicate = duplicate.filter(vehicle_stocks::Column::Id.ne(id));
        }
        ensure_unique(&self.db, duplicate, "Stock number").await?;
        find_required::<vehicles::Entity, _>(&self.db, input.vehicle_id, "Vehicle").await?;
        for line in &input.items {
            find_required::<items::Entity, _>(&self.db, line.item_id, "Item").await?;
        }
        Ok(stock_no)
    }

    /// Records a stock movement with its lines.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `StoreError::Duplicate` or
    /// `StoreError::NotFound` for a missing vehicle or item.
    pub async fn create(&self, input: VehicleStockInput) -> StoreResult<VehicleStockWithLines> {
        let stock_no = self.check(&input, None).await?;

        let now = Utc::now().into();
        let txn = self.db.begin().await?;
        let stock = vehicle_stocks::ActiveModel {
            id: Set(Uuid::new_v4()),
            stock_no: Set(stock_no),
            vehicle_id: Set(input.vehicle_id),
            date: Set(input.date),
            stock_type: Set(input.stock_type),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;
        vehicle_stock_lines::Entity::insert_many(line_models(stock.id, &input))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!(stock_id = %stock.id, stock_type = ?stock.stock_type, "vehicle stock created");
        self.get(stock.id).await
    }

    /// Lists stock movements, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<vehicle_stocks::Model>> {
        let query = vehicle_stocks::Entity::find()
            .order_by_desc(vehicle_stocks::Column::Date)
            .order_by_desc(vehicle_stocks::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Loads a stock movement with its lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the movement does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<VehicleStockWithLines> {
        let stock = find_required::<vehicle_stocks::Entity, _>(&self.db, id, "Vehicle stock").await?;
        let items = stock
            .find_related(vehicle_stock_lines::Entity)
            .all(&self.db)
            .await?;
        Ok(VehicleStockWithLines { stock, items })
    }

    /// Replaces a stock movement and its lines.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn update(&self, id: Uuid, input: VehicleStockInput) -> StoreResult<VehicleStockWithLines> {
        let existing = find_required::<vehicle_stocks::Entity, _>(&self.db, id, "Vehicle stock").await?;
        let stock_no = self.check(&input, Some(id)).await?;

        let txn = self.db.begin().await?;
        let mut stock: vehicle_stocks::ActiveModel = existing.into();
        stock.stock_no = Set(stock_no);
        stock.vehicle_id = Set(input.vehicle_id);
        stock.date = Set(input.date);
        stock.stock_type = Set(input.stock_type);
        stock.updated_at = Set(Utc::now().into());
        stock.update(&txn).await?;

        vehicle_stock_lines::Entity::delete_many()
            .filter(vehicle_stock_lines::Column::VehicleStockId.eq(id))
            .exec(&txn)
            .await?;
        vehicle_stock_lines::Entity::insert_many(line_models(id, &input))
            .exec(&txn)
            .await?;
        txn.commit().await?;

        tracing::info!(stock_id = %id, "vehicle stock updated");
        self.get(id).await
    }

    /// Deletes a stock movement and its lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the movement does not exist.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let existing = find_required::<vehicle_stocks::Entity, _>(&self.db, id, "Vehicle stock").await?;

        let txn = self.db.begin().await?;
        vehicle_stock_lines::Entity::delete_many()
            .filter(vehicle_stock_lines::Column::VehicleStockId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;
        txn.commit().await?;

        tracing::info!(stock_id = %id, "vehicle stock deleted");
        Ok(())
    }
}
