//! Item category repository.

use chrono::Utc;
use khata_core::validation::required_text;
use khata_shared::types::{PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_unique, fetch_page, find_required};
use crate::entities::categories;
use crate::error::StoreResult;

/// Input for creating or renaming a category.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    /// Unique name.
    #[validate(length(min = 1))]
    pub category_name: String,
}

/// Category repository.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn unique_name(&self, name: &str, except: Option<Uuid>) -> StoreResult<String> {
        let name = required_text("categoryName", name)?;
        let mut query = categories::Entity::find().filter(categories::Column::CategoryName.eq(&name));
        if let Some(id) = except {
            query = query.filter(categories::Column::Id.ne(id));
        }
        ensure_unique(&self.db, query, "Category name").await?;
        Ok(name)
    }

    /// Creates a category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` for a taken name.
    pub async fn create(&self, input: CategoryInput) -> StoreResult<categories::Model> {
        let name = self.unique_name(&input.category_name, None).await?;
        let now = Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(Uuid::new_v4()),
            category_name: Set(name),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(category_id = %category.id, "category created");
        Ok(category)
    }

    /// Lists categories, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<categories::Model>> {
        let query = categories::Entity::find().order_by_desc(categories::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the category does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<categories::Model> {
        find_required::<categories::Entity, _>(&self.db, id, "Category").await
    }

    /// Renames a category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::Duplicate`.
    pub async fn update(&self, id: Uuid, input: CategoryInput) -> StoreResult<categories::Model> {
        let existing = self.get(id).await?;
        let name = self.unique_name(&input.category_name, Some(id)).await?;
        let mut category: categories::ActiveModel = existing.into();
        category.category_name = Set(name);
        category.updated_at = Set(Utc::now().into());
        Ok(category.update(&self.db).await?)
    }

    /// Deletes a category.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` while items use it.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        tracing::info!(category_id = %id, "category deleted");
        Ok(())
    }
}
