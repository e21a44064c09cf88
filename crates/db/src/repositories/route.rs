//! Delivery route repository.

use chrono::{NaiveDate, Utc};
use khata_core::validation::{optional_text, required_text};
use khata_shared::types::{PageRequest, PageResponse};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{fetch_page, find_required};
use crate::entities::routes;
use crate::error::StoreResult;

/// Input for creating a route.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RouteInput {
    /// Route name.
    #[validate(length(min = 1))]
    pub route_name: String,
    /// Area the route covers.
    pub location: Option<String>,
    /// Date the route became effective.
    pub as_of_date: Option<NaiveDate>,
}

/// Partial update of a route.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRouteInput {
    /// Route name.
    #[validate(length(min = 1))]
    pub route_name: Option<String>,
    /// Area the route covers.
    pub location: Option<String>,
    /// Date the route became effective.
    pub as_of_date: Option<NaiveDate>,
}

/// Route repository.
#[derive(Debug, Clone)]
pub struct RouteRepository {
    db: DatabaseConnection,
}

impl RouteRepository {
    /// Creates a new route repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a route.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name.
    pub async fn create(&self, input: RouteInput) -> StoreResult<routes::Model> {
        let now = Utc::now().into();
        let route = routes::ActiveModel {
            id: Set(Uuid::new_v4()),
            route_name: Set(required_text("routeName", &input.route_name)?),
            location: Set(optional_text(input.location.as_deref())),
            as_of_date: Set(input.as_of_date),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(route_id = %route.id, "route created");
        Ok(route)
    }

    /// Lists routes, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<routes::Model>> {
        let query = routes::Entity::find().order_by_desc(routes::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a route by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the route does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<routes::Model> {
        find_required::<routes::Entity, _>(&self.db, id, "Route").await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the route does not exist.
    pub async fn update(&self, id: Uuid, input: UpdateRouteInput) -> StoreResult<routes::Model> {
        let mut route: routes::ActiveModel = self.get(id).await?.into();
        if let Some(name) = input.route_name {
            route.route_name = Set(required_text("routeName", &name)?);
        }
        if let Some(location) = input.location {
            route.location = Set(optional_text(Some(&location)));
        }
        if let Some(as_of_date) = input.as_of_date {
            route.as_of_date = Set(Some(as_of_date));
        }
        route.updated_at = Set(Utc::now().into());
        Ok(route.update(&self.db).await?)
    }

    /// Deletes a route.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` while vehicles or parties use it.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        tracing::info!(route_id = %id, "route deleted");
        Ok(())
    }
}
