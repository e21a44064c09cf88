//! Company record repository.
//!
//! There is at most one company row. Its `opening_bal` is the running cash
//! balance that cash-settled documents move.

use chrono::Utc;
use khata_core::validation::{money, optional_text, required_text};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::entities::company_details;
use crate::error::{StoreError, StoreResult};

/// Input for creating the company record.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    /// Registered name.
    #[validate(length(min = 1))]
    pub company_name: String,
    /// Contact email.
    #[validate(email)]
    pub email: Option<String>,
    /// Contact phone.
    pub phone_number: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// GST registration number.
    pub gst_no: Option<String>,
    /// Cash in hand when the books were opened.
    pub opening_bal: Option<Decimal>,
}

/// Partial update of the company record.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyInput {
    /// Registered name.
    #[validate(length(min = 1))]
    pub company_name: Option<String>,
    /// Contact email.
    #[validate(email)]
    pub email: Option<String>,
    /// Contact phone.
    pub phone_number: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// GST registration number.
    pub gst_no: Option<String>,
    /// Overwrites the running cash balance.
    pub opening_bal: Option<Decimal>,
}

/// Repository for the single company record.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    db: DatabaseConnection,
}

impl CompanyRepository {
    /// Creates a new company repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Returns the company record if it has been created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(&self) -> StoreResult<Option<company_details::Model>> {
        Ok(company_details::Entity::find().one(&self.db).await?)
    }

    /// Returns the company record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` before the record is created.
    pub async fn get(&self) -> StoreResult<company_details::Model> {
        self.find().await?.ok_or(StoreError::NotFound("Company"))
    }

    /// Creates the company record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Rule` if a company record already exists.
    pub async fn create(&self, input: CompanyInput) -> StoreResult<company_details::Model> {
        if self.find().await?.is_some() {
            return Err(StoreError::Rule("Company details already exist".to_string()));
        }

        let now = Utc::now().into();
        let company = company_details::ActiveModel {
            id: Set(Uuid::new_v4()),
            company_name: Set(required_text("companyName", &input.company_name)?),
            email: Set(optional_text(input.email.as_deref())),
            phone_number: Set(optional_text(input.phone_number.as_deref())),
            address: Set(optional_text(input.address.as_deref())),
            gst_no: Set(optional_text(input.gst_no.as_deref())),
            opening_bal: Set(money("openingBal", input.opening_bal.unwrap_or_default())?),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(company_id = %company.id, "company record created");
        Ok(company)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` before the record is created.
    pub async fn update(&self, input: UpdateCompanyInput) -> StoreResult<company_details::Model> {
        let mut company: company_details::ActiveModel = self.get().await?.into();

        if let Some(name) = input.company_name {
            company.company_name = Set(required_text("companyName", &name)?);
        }
        if let Some(email) = input.email {
            company.email = Set(optional_text(Some(&email)));
        }
        if let Some(phone_number) = input.phone_number {
            company.phone_number = Set(optional_text(Some(&phone_number)));
        }
        if let Some(address) = input.address {
            company.address = Set(optional_text(Some(&address)));
        }
        if let Some(gst_no) = input.gst_no {
            company.gst_no = Set(optional_text(Some(&gst_no)));
        }
        if let Some(opening_bal) = input.opening_bal {
            let opening_bal = money("openingBal", opening_bal)?;
            tracing::warn!(%opening_bal, "company cash balance overwritten");
            company.opening_bal = Set(opening_bal);
        }
        company.updated_at = Set(Utc::now().into());

        Ok(company.update(&self.db).await?)
    }
}
