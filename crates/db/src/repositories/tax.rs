//! Tax rate repository.

use chrono::Utc;
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

use super::{ensure_unique, fetch_page, find_required};
use crate::entities::taxes;
use crate::error::StoreResult;

/// Input for creating a tax rate.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaxInput {
    /// Unique name.
    #[validate(length(min = 1))]
    pub tax_name: String,
    /// Rate in percent.
    pub tax_percentage: Decimal,
}

/// Partial update of a tax rate.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaxInput {
    /// New name.
    #[validate(length(min = 1))]
    pub tax_name: Option<String>,
    /// New rate in percent.
    pub tax_percentage: Option<Decimal>,
}

fn checked_percentage(value: Decimal) -> StoreResult<Decimal> {
    let value = non_negative("taxPercentage", value)?;
    if value > Decimal::ONE_HUNDRED {
        return Err(ValidationError::InvalidFormat {
            field: "taxPercentage",
            expected: "between 0 and 100",
        }
        .into());
    }
    Ok(value)
}

/// Tax repository.
#[derive(Debug, Clone)]
pub struct TaxRepository {
    db: DatabaseConnection,
}

impl TaxRepository {
    /// Creates a new tax repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn unique_name(&self, name: &str, except: Option<Uuid>) -> StoreResult<String> {
        let name = required_text("taxName", name)?;
        let mut query = taxes::Entity::find().filter(taxes::Column::TaxName.eq(&name));
        if let Some(id) = except {
            query = query.filter(taxes::Column::Id.ne(id));
        }
        ensure_unique(&self.db, query, "Tax name").await?;
        Ok(name)
    }

    /// Creates a tax rate.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` for a taken name or a validation
    /// error for a rate outside 0 to 100.
    pub async fn create(&self, input: TaxInput) -> StoreResult<taxes::Model> {
        let name = self.unique_name(&input.tax_name, None).await?;
        let now = Utc::now().into();
        let tax = taxes::ActiveModel {
            id: Set(Uuid::new_v4()),
            tax_name: Set(name),
            tax_percentage: Set(checked_percentage(input.tax_percentage)?),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(tax_id = %tax.id, "tax rate created");
        Ok(tax)
    }

    /// Lists tax rates, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<taxes::Model>> {
        let query = taxes::Entity::find().order_by_desc(taxes::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a tax rate by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the tax rate does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<taxes::Model> {
        find_required::<taxes::Entity, _>(&self.db, id, "Tax").await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, `StoreError::Duplicate` or a validation
    /// error.
    pub async fn update(&self, id: Uuid, input: UpdateTaxInput) -> StoreResult<taxes::Model> {
        let mut tax: taxes::ActiveModel = self.get(id).await?.into();
        if let Some(name) = input.tax_name {
            tax.tax_name = Set(self.unique_name(&name, Some(id)).await?);
        }
        if let Some(percentage) = input.tax_percentage {
            tax.tax_percentage = Set(checked_percentage(percentage)?);
        }
        tax.updated_at = Set(Utc::now().into());
        Ok(tax.update(&self.db).await?)
    }

    /// Deletes a tax rate.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` while items use it.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        tracing::info!(tax_id = %id, "tax rate deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(checked_percentage(dec!(13)).unwrap(), dec!(13));
        assert!(checked_percentage(dec!(100)).is_ok());
        assert!(checked_percentage(dec!(100.01)).is_err());
        assert!(checked_percentage(dec!(-1)).is_err());
    }
}
