//! Ledger group repository.
//!
//! Groups form a tree: a parent must be able to hold groups and a group may
//! never end up under itself.

use std::collections::HashSet;

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
use crate::entities::{ledger_groups, sea_orm_active_enums::GroupType};
use crate::error::{StoreError, StoreResult};

/// Input for creating a ledger group.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GroupInput {
    /// Unique name.
    #[validate(length(min = 1))]
    pub group_name: String,
    /// Whether the node holds groups, ledgers or both.
    pub group_type: GroupType,
    /// Optional parent group.
    pub parent_id: Option<Uuid>,
}

/// Partial update of a ledger group.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupInput {
    /// New name.
    #[validate(length(min = 1))]
    pub group_name: Option<String>,
    /// New type.
    pub group_type: Option<GroupType>,
    /// New parent; `null` is treated as "unchanged".
    pub parent_id: Option<Uuid>,
}

/// Ledger group repository.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    db: DatabaseConnection,
}

impl GroupRepository {
    /// Creates a new group repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check_parent(&self, parent_id: Uuid, child: Option<Uuid>) -> StoreResult<()> {
        let parent = find_required::<ledger_groups::Entity, _>(&self.db, parent_id, "Parent group")
            .await?;
        if !parent.group_type.can_contain_groups() {
            return Err(StoreError::Rule(
                "Parent must be a group that can contain other groups".to_string(),
            ));
        }

        let Some(child) = child else {
            return Ok(());
        };

        // Walk up from the new parent; meeting the child means a cycle.
        let mut seen = HashSet::new();
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node.id == child {
                return Err(StoreError::Rule(
                    "A group cannot be placed under itself".to_string(),
                ));
            }
            if !seen.insert(node.id) {
                break;
            }
            cursor = match node.parent_id {
                Some(id) => ledger_groups::Entity::find_by_id(id).one(&self.db).await?,
                None => None,
            };
        }
        Ok(())
    }

    /// Creates a group.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` for a taken name and `StoreError::Rule`
    /// for a parent that cannot hold groups.
    pub async fn create(&self, input: GroupInput) -> StoreResult<ledger_groups::Model> {
        let group_name = required_text("groupName", &input.group_name)?;
        ensure_unique(
            &self.db,
            ledger_groups::Entity::find().filter(ledger_groups::Column::GroupName.eq(&group_name)),
            "Group name",
        )
        .await?;
        if let Some(parent_id) = input.parent_id {
            self.check_parent(parent_id, None).await?;
        }

        let now = Utc::now().into();
        let group = ledger_groups::ActiveModel {
            id: Set(Uuid::new_v4()),
            group_name: Set(group_name),
            group_type: Set(input.group_type),
            parent_id: Set(input.parent_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(group_id = %group.id, "ledger group created");
        Ok(group)
    }

    /// Lists groups, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<ledger_groups::Model>> {
        let query = ledger_groups::Entity::find().order_by_desc(ledger_groups::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a group by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the group does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<ledger_groups::Model> {
        find_required::<ledger_groups::Entity, _>(&self.db, id, "Group").await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, `StoreError::Duplicate` or
    /// `StoreError::Rule` for an invalid parent.
    pub async fn update(&self, id: Uuid, input: UpdateGroupInput) -> StoreResult<ledger_groups::Model> {
        let existing = self.get(id).await?;
        let mut group: ledger_groups::ActiveModel = existing.clone().into();

        if let Some(name) = input.group_name {
            let name = required_text("groupName", &name)?;
            ensure_unique(
                &self.db,
                ledger_groups::Entity::find()
                    .filter(ledger_groups::Column::GroupName.eq(&name))
                    .filter(ledger_groups::Column::Id.ne(id)),
                "Group name",
            )
            .await?;
            group.group_name = Set(name);
        }
        if let Some(group_type) = input.group_type {
            if !group_type.can_contain_groups() {
                let children = ledger_groups::Entity::find()
                    .filter(ledger_groups::Column::ParentId.eq(id))
                    .one(&self.db)
                    .await?;
                if children.is_some() {
                    return Err(StoreError::Rule(
                        "Group has sub-groups and must stay a group".to_string(),
                    ));
                }
            }
            group.group_type = Set(group_type);
        }
        if let Some(parent_id) = input.parent_id {
            self.check_parent(parent_id, Some(existing.id)).await?;
            group.parent_id = Set(Some(parent_id));
        }
        group.updated_at = Set(Utc::now().into());

        Ok(group.update(&self.db).await?)
    }

    /// Deletes a group.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, or `StoreError::Conflict` while other
    /// records still reference the group.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let group = self.get(id).await?;
        group.delete(&self.db).await?;
        tracing::info!(group_id = %id, "ledger group deleted");
        Ok(())
    }
}
