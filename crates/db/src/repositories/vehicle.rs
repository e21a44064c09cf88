//! Vehicle repository.

use chrono::{NaiveDate, Utc};
use khata_core::validation::required_text;
use khata_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_exists, ensure_unique, fetch_page, find_required};
use crate::entities::{ledger_groups, routes, vehicles};
use crate::error::StoreResult;

/// Input for creating a vehicle.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    /// Registration number, unique.
    #[validate(length(min = 1))]
    pub vehicle_no: String,
    /// Display name.
    #[validate(length(min = 1))]
    pub vehicle_name: String,
    /// Active flag, defaults to active.
    pub status: Option<bool>,
    /// Date the vehicle entered service.
    pub as_of_date: Option<NaiveDate>,
    /// Route the vehicle serves.
    pub assigned_route_id: Option<Uuid>,
    /// Ledger group for payments to the vehicle.
    pub group_id: Option<Uuid>,
}

/// Partial update of a vehicle.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleInput {
    /// Registration number.
    #[validate(length(min = 1))]
    pub vehicle_no: Option<String>,
    /// Display name.
    #[validate(length(min = 1))]
    pub vehicle_name: Option<String>,
    /// Active flag.
    pub status: Option<bool>,
    /// Date the vehicle entered service.
    pub as_of_date: Option<NaiveDate>,
    /// Route the vehicle serves.
    pub assigned_route_id: Option<Uuid>,
    /// Ledger group.
    pub group_id: Option<Uuid>,
}

/// Vehicle repository.
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    db: DatabaseConnection,
}

impl VehicleRepository {
    /// Creates a new vehicle repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a vehicle.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` for a taken vehicle number and
    /// `StoreError::NotFound` for a missing route or group.
    pub async fn create(&self, input: VehicleInput) -> StoreResult<vehicles::Model> {
        let vehicle_no = required_text("vehicleNo", &input.vehicle_no)?;
        let vehicle_name = required_text("vehicleName", &input.vehicle_name)?;
        ensure_unique(
            &self.db,
            vehicles::Entity::find().filter(vehicles::Column::VehicleNo.eq(&vehicle_no)),
            "Vehicle number",
        )
        .await?;
        ensure_exists::<routes::Entity, _>(&self.db, input.assigned_route_id, "Route").await?;
        ensure_exists::<ledger_groups::Entity, _>(&self.db, input.group_id, "Group").await?;

        let now = Utc::now().into();
        let vehicle = vehicles::ActiveModel {
            id: Set(Uuid::new_v4()),
            vehicle_no: Set(vehicle_no),
            vehicle_name: Set(vehicle_name),
            status: Set(input.status.unwrap_or(true)),
            as_of_date: Set(input.as_of_date),
            assigned_route_id: Set(input.assigned_route_id),
            group_id: Set(input.group_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(vehicle_id = %vehicle.id, "vehicle created");
        Ok(vehicle)
    }

    /// Lists vehicles, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<vehicles::Model>> {
        let query = vehicles::Entity::find().order_by_desc(vehicles::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a vehicle by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the vehicle does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<vehicles::Model> {
        find_required::<vehicles::Entity, _>(&self.db, id, "Vehicle").await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::Duplicate`.
    pub async fn update(&self, id: Uuid, input: UpdateVehicleInput) -> StoreResult<vehicles::Model> {
        let mut vehicle: vehicles::ActiveModel = self.get(id).await?.into();

        if let Some(vehicle_no) = input.vehicle_no {
            let vehicle_no = required_text("vehicleNo", &vehicle_no)?;
            ensure_unique(
                &self.db,
                vehicles::Entity::find()
                    .filter(vehicles::Column::VehicleNo.eq(&vehicle_no))
                    .filter(vehicles::Column::Id.ne(id)),
                "Vehicle number",
            )
            .await?;
            vehicle.vehicle_no = Set(vehicle_no);
        }
        if let Some(name) = input.vehicle_name {
            vehicle.vehicle_name = Set(required_text("vehicleName", &name)?);
        }
        if let Some(status) = input.status {
            vehicle.status = Set(status);
        }
        if let Some(as_of_date) = input.as_of_date {
            vehicle.as_of_date = Set(Some(as_of_date));
        }
        if input.assigned_route_id.is_some() {
            ensure_exists::<routes::Entity, _>(&self.db, input.assigned_route_id, "Route").await?;
            vehicle.assigned_route_id = Set(input.assigned_route_id);
        }
        if input.group_id.is_some() {
            ensure_exists::<ledger_groups::Entity, _>(&self.db, input.group_id, "Group").await?;
            vehicle.group_id = Set(input.group_id);
        }
        vehicle.updated_at = Set(Utc::now().into());

        Ok(vehicle.update(&self.db).await?)
    }

    /// Deletes a vehicle.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` while stock movements reference it.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        tracing::info!(vehicle_id = %id, "vehicle deleted");
        Ok(())
    }
}
