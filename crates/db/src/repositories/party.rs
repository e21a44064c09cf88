//! Party (customer and supplier) repository.

use chrono::{NaiveDate, Utc};
use khata_core::validation::{optional_text, required_text};
use khata_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Select, Set,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{checked_phone, ensure_exists, ensure_unique, fetch_page, find_required};
use crate::entities::{
    ledger_groups, parties, routes,
    sea_orm_active_enums::{BalanceType, PartyType},
};
use crate::error::StoreResult;

/// Input for creating a party.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PartyInput {
    /// Party name.
    #[validate(length(min = 1))]
    pub party_name: String,
    /// Unique phone number.
    pub phone_number: String,
    /// Unique email.
    #[validate(email)]
    pub email: Option<String>,
    /// Route the party sits on.
    pub assigned_route_id: Option<Uuid>,
    /// Postal address.
    pub address: Option<String>,
    /// Latitude of the shop.
    pub latitude: Option<Decimal>,
    /// Longitude of the shop.
    pub longitude: Option<Decimal>,
    /// Customer, supplier or both.
    pub party_type: PartyType,
    /// Visiting order on the route.
    pub route_priority: Option<i32>,
    /// Date the opening balance refers to.
    pub as_of_date: Option<NaiveDate>,
    /// Balance carried over from before the books were opened.
    pub opening_bal: Option<Decimal>,
    /// Whether the opening balance is payable or receivable.
    pub balance_type: BalanceType,
    /// Active flag, defaults to active.
    pub status: Option<bool>,
    /// Ledger group.
    pub group_id: Option<Uuid>,
}

/// Partial update of a party.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartyInput {
    /// Party name.
    #[validate(length(min = 1))]
    pub party_name: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Email; blank clears it.
    #[validate(email)]
    pub email: Option<String>,
    /// Route.
    pub assigned_route_id: Option<Uuid>,
    /// Postal address.
    pub address: Option<String>,
    /// Latitude.
    pub latitude: Option<Decimal>,
    /// Longitude.
    pub longitude: Option<Decimal>,
    /// Party type.
    pub party_type: Option<PartyType>,
    /// Visiting order on the route.
    pub route_priority: Option<i32>,
    /// Opening balance date.
    pub as_of_date: Option<NaiveDate>,
    /// Opening balance.
    pub opening_bal: Option<Decimal>,
    /// Balance direction.
    pub balance_type: Option<BalanceType>,
    /// Active flag.
    pub status: Option<bool>,
    /// Ledger group.
    pub group_id: Option<Uuid>,
}

/// Party repository.
#[derive(Debug, Clone)]
pub struct PartyRepository {
    db: DatabaseConnection,
}

impl PartyRepository {
    /// Creates a new party repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn others(except: Option<Uuid>) -> Select<parties::Entity> {
        let query = parties::Entity::find();
        match except {
            Some(id) => query.filter(parties::Column::Id.ne(id)),
            None => query,
        }
    }

    async fn check_contacts(
        &self,
        phone_number: Option<&str>,
        email: Option<&str>,
        except: Option<Uuid>,
    ) -> StoreResult<()> {
        if let Some(phone_number) = phone_number {
            ensure_unique(
                &self.db,
                Self::others(except).filter(parties::Column::PhoneNumber.eq(phone_number)),
                "Phone number",
            )
            .await?;
        }
        if let Some(email) = email {
            ensure_unique(
                &self.db,
                Self::others(except).filter(parties::Column::Email.eq(email)),
                "Email",
            )
            .await?;
        }
        Ok(())
    }

    /// Creates a party.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` for a taken phone or email and
    /// `StoreError::NotFound` for a missing route or group.
    pub async fn create(&self, input: PartyInput) -> StoreResult<parties::Model> {
        let party_name = required_text("partyName", &input.party_name)?;
        let phone_number = checked_phone(&input.phone_number)?;
        let email = optional_text(input.email.as_deref()).map(|e| e.to_lowercase());

        self.check_contacts(Some(&phone_number), email.as_deref(), None)
            .await?;
        ensure_exists::<routes::Entity, _>(&self.db, input.assigned_route_id, "Route").await?;
        ensure_exists::<ledger_groups::Entity, _>(&self.db, input.group_id, "Group").await?;

        let now = Utc::now().into();
        let party = parties::ActiveModel {
            id: Set(Uuid::new_v4()),
            party_name: Set(party_name),
            phone_number: Set(phone_number),
            email: Set(email),
            assigned_route_id: Set(input.assigned_route_id),
            address: Set(optional_text(input.address.as_deref())),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            party_type: Set(input.party_type),
            route_priority: Set(input.route_priority),
            as_of_date: Set(input.as_of_date),
            opening_bal: Set(input.opening_bal.unwrap_or_default()),
            balance_type: Set(input.balance_type),
            status: Set(input.status.unwrap_or(true)),
            group_id: Set(input.group_id),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(party_id = %party.id, "party created");
        Ok(party)
    }

    /// Lists parties, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<parties::Model>> {
        let query = parties::Entity::find().order_by_desc(parties::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a party by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the party does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<parties::Model> {
        find_required::<parties::Entity, _>(&self.db, id, "Party").await
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::Duplicate`.
    pub async fn update(&self, id: Uuid, input: UpdatePartyInput) -> StoreResult<parties::Model> {
        let mut party: parties::ActiveModel = self.get(id).await?.into();

        let phone_number = input.phone_number.as_deref().map(checked_phone).transpose()?;
        let email = input
            .email
            .as_deref()
            .map(|e| optional_text(Some(e)).map(|e| e.to_lowercase()));
        self.check_contacts(
            phone_number.as_deref(),
            email.as_ref().and_then(Option::as_deref),
            Some(id),
        )
        .await?;

        if let Some(name) = input.party_name {
            party.party_name = Set(required_text("partyName", &name)?);
        }
        if let Some(phone_number) = phone_number {
            party.phone_number = Set(phone_number);
        }
        if let Some(email) = email {
            party.email = Set(email);
        }
        if input.assigned_route_id.is_some() {
            ensure_exists::<routes::Entity, _>(&self.db, input.assigned_route_id, "Route").await?;
            party.assigned_route_id = Set(input.assigned_route_id);
        }
        if let Some(address) = input.address {
            party.address = Set(optional_text(Some(&address)));
        }
        if input.latitude.is_some() {
            party.latitude = Set(input.latitude);
        }
        if input.longitude.is_some() {
            party.longitude = Set(input.longitude);
        }
        if let Some(party_type) = input.party_type {
            party.party_type = Set(party_type);
        }
        if input.route_priority.is_some() {
            party.route_priority = Set(input.route_priority);
        }
        if input.as_of_date.is_some() {
            party.as_of_date = Set(input.as_of_date);
        }
        if let Some(opening_bal) = input.opening_bal {
            party.opening_bal = Set(opening_bal);
        }
        if let Some(balance_type) = input.balance_type {
            party.balance_type = Set(balance_type);
        }
        if let Some(status) = input.status {
            party.status = Set(status);
        }
        if input.group_id.is_some() {
            ensure_exists::<ledger_groups::Entity, _>(&self.db, input.group_id, "Group").await?;
            party.group_id = Set(input.group_id);
        }
        party.updated_at = Set(Utc::now().into());

        Ok(party.update(&self.db).await?)
    }

    /// Deletes a party.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` while documents reference it.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.get(id).await?.delete(&self.db).await?;
        tracing::info!(party_id = %id, "party deleted");
        Ok(())
    }
}
