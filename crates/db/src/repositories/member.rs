//! Member repository: staff accounts, credentials and login lookup.

use chrono::{NaiveDate, Utc};
use khata_core::auth::{
    LoginIdentifier, PasswordError, hash_password, is_username, validate_password, verify_password,
};
use khata_core::validation::{ValidationError, optional_text, required_text};
use khata_shared::AppError;
use khata_shared::types::{PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{checked_phone, ensure_unique, fetch_page, find_required};
use crate::entities::{members, sea_orm_active_enums::MemberRole};
use crate::error::{StoreError, StoreResult};

/// Why a login attempt was refused.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown member or wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The member exists but has been deactivated.
    #[error("User deactivated")]
    Deactivated,

    /// The login name is not an email, phone number or username.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Storage failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<PasswordError> for LoginError {
    fn from(err: PasswordError) -> Self {
        Self::Store(StoreError::Password(err))
    }
}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => Self::Unauthorized(err.to_string()),
            LoginError::Deactivated => Self::Forbidden(err.to_string()),
            LoginError::Validation(inner) => Self::Validation(inner.to_string()),
            LoginError::Store(inner) => inner.into(),
        }
    }
}

/// Input for creating a member.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberInput {
    /// Login name, 3 to 20 letters, digits or underscores.
    #[validate(length(min = 3, max = 20))]
    pub username: String,
    /// Display name.
    #[validate(length(min = 1))]
    pub name: String,
    /// Unique email.
    #[validate(email)]
    pub email: String,
    /// Unique phone number.
    pub phone_number: String,
    /// Emergency contact.
    pub emergency_number: Option<String>,
    /// Plain password; stored as an Argon2 hash.
    pub password: String,
    /// Role deciding what the member may do.
    pub role: MemberRole,
    /// Postal address.
    pub address: Option<String>,
    /// Profile image URL.
    pub image: Option<String>,
    /// Member's own opening balance.
    pub opening_bal: Option<Decimal>,
    /// Company balance carried by the member.
    pub company_opening_bal: Option<Decimal>,
    /// Joining date.
    pub joining_date: Option<NaiveDate>,
    /// Monthly salary.
    pub salary: Option<Decimal>,
}

/// Partial update of a member. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberInput {
    /// New login name.
    #[validate(length(min = 3, max = 20))]
    pub username: Option<String>,
    /// New display name.
    #[validate(length(min = 1))]
    pub name: Option<String>,
    /// New email.
    #[validate(email)]
    pub email: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// Emergency contact; blank clears it.
    pub emergency_number: Option<String>,
    /// New password; re-hashed when present.
    pub password: Option<String>,
    /// New role.
    pub role: Option<MemberRole>,
    /// Postal address; blank clears it.
    pub address: Option<String>,
    /// Profile image URL; blank clears it.
    pub image: Option<String>,
    /// Active flag.
    pub status: Option<bool>,
    /// Member's own opening balance.
    pub opening_bal: Option<Decimal>,
    /// Company balance carried by the member.
    pub company_opening_bal: Option<Decimal>,
    /// Joining date.
    pub joining_date: Option<NaiveDate>,
    /// Monthly salary.
    pub salary: Option<Decimal>,
}

fn checked_username(value: &str) -> StoreResult<String> {
    let value = required_text("username", value)?;
    if !is_username(&value) {
        return Err(ValidationError::InvalidFormat {
            field: "username",
            expected: "3 to 20 letters, digits or underscores",
        }
        .into());
    }
    Ok(value)
}

fn new_password_hash(password: &str) -> StoreResult<String> {
    validate_password(password)?;
    Ok(hash_password(password)?)
}

/// Member repository for CRUD operations and login.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    db: DatabaseConnection,
}

impl MemberRepository {
    /// Creates a new member repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn ensure_unique_fields(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        phone_number: Option<&str>,
        except: Option<Uuid>,
    ) -> StoreResult<()> {
        let scoped = || {
            let query = members::Entity::find();
            match except {
                Some(id) => query.filter(members::Column::Id.ne(id)),
                None => query,
            }
        };

        if let Some(username) = username {
            ensure_unique(
                &self.db,
                scoped().filter(members::Column::Username.eq(username)),
                "Username",
            )
            .await?;
        }
        if let Some(email) = email {
            ensure_unique(&self.db, scoped().filter(members::Column::Email.eq(email)), "Email")
                .await?;
        }
        if let Some(phone_number) = phone_number {
            ensure_unique(
                &self.db,
                scoped().filter(members::Column::PhoneNumber.eq(phone_number)),
                "Phone number",
            )
            .await?;
        }
        Ok(())
    }

    /// Creates a member with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` naming the first taken field, or a
    /// validation error for a malformed username, phone or password.
    pub async fn create(&self, input: CreateMemberInput) -> StoreResult<members::Model> {
        let username = checked_username(&input.username)?;
        let name = required_text("name", &input.name)?;
        let email = required_text("email", &input.email)?.to_lowercase();
        let phone_number = checked_phone(&input.phone_number)?;
        let password_hash = new_password_hash(&input.password)?;

        self.ensure_unique_fields(Some(&username), Some(&email), Some(&phone_number), None)
            .await?;

        let now = Utc::now().into();
        let member = members::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username),
            name: Set(name),
            email: Set(email),
            phone_number: Set(phone_number),
            emergency_number: Set(optional_text(input.emergency_number.as_deref())),
            password_hash: Set(password_hash),
            role: Set(input.role),
            address: Set(optional_text(input.address.as_deref())),
            image: Set(optional_text(input.image.as_deref())),
            status: Set(true),
            opening_bal: Set(input.opening_bal.unwrap_or_default()),
            company_opening_bal: Set(input.company_opening_bal.unwrap_or_default()),
            joining_date: Set(input.joining_date),
            salary: Set(input.salary.unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        tracing::info!(member_id = %member.id, role = ?member.role, "member created");
        Ok(member)
    }

    /// Lists members, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<members::Model>> {
        let query = members::Entity::find().order_by_desc(members::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a member by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the member does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<members::Model> {
        find_required::<members::Entity, _>(&self.db, id, "Member").await
    }

    /// Finds a member that may still use the system.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active(&self, id: Uuid) -> StoreResult<Option<members::Model>> {
        Ok(members::Entity::find_by_id(id)
            .filter(members::Column::Status.eq(true))
            .one(&self.db)
            .await?)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, `StoreError::Duplicate` or a validation
    /// error.
    pub async fn update(&self, id: Uuid, input: UpdateMemberInput) -> StoreResult<members::Model> {
        let existing = self.get(id).await?;

        let username = input.username.as_deref().map(checked_username).transpose()?;
        let email = input
            .email
            .as_deref()
            .map(|email| required_text("email", email).map(|e| e.to_lowercase()))
            .transpose()?;
        let phone_number = input.phone_number.as_deref().map(checked_phone).transpose()?;

        self.ensure_unique_fields(
            username.as_deref(),
            email.as_deref(),
            phone_number.as_deref(),
            Some(id),
        )
        .await?;

        let mut member: members::ActiveModel = existing.into();
        if let Some(username) = username {
            member.username = Set(username);
        }
        if let Some(name) = input.name {
            member.name = Set(required_text("name", &name)?);
        }
        if let Some(email) = email {
            member.email = Set(email);
        }
        if let Some(phone_number) = phone_number {
            member.phone_number = Set(phone_number);
        }
        if let Some(emergency_number) = input.emergency_number {
            member.emergency_number = Set(optional_text(Some(&emergency_number)));
        }
        if let Some(password) = input.password {
            member.password_hash = Set(new_password_hash(&password)?);
        }
        if let Some(role) = input.role {
            member.role = Set(role);
        }
        if let Some(address) = input.address {
            member.address = Set(optional_text(Some(&address)));
        }
        if let Some(image) = input.image {
            member.image = Set(optional_text(Some(&image)));
        }
        if let Some(status) = input.status {
            member.status = Set(status);
        }
        if let Some(opening_bal) = input.opening_bal {
            member.opening_bal = Set(opening_bal);
        }
        if let Some(company_opening_bal) = input.company_opening_bal {
            member.company_opening_bal = Set(company_opening_bal);
        }
        if let Some(joining_date) = input.joining_date {
            member.joining_date = Set(Some(joining_date));
        }
        if let Some(salary) = input.salary {
            member.salary = Set(salary);
        }
        member.updated_at = Set(Utc::now().into());

        let member = member.update(&self.db).await?;
        tracing::info!(member_id = %member.id, "member updated");
        Ok(member)
    }

    /// Deactivates a member. Members are never hard-deleted because
    /// documents may name them.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the member does not exist.
    pub async fn deactivate(&self, id: Uuid) -> StoreResult<members::Model> {
        let mut member: members::ActiveModel = self.get(id).await?.into();
        member.status = Set(false);
        member.updated_at = Set(Utc::now().into());
        let member = member.update(&self.db).await?;
        tracing::info!(member_id = %member.id, "member deactivated");
        Ok(member)
    }

    /// Checks a login name and password.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::InvalidCredentials` for an unknown member or a
    /// wrong password and `LoginError::Deactivated` for a blocked member.
    pub async fn authenticate(&self, login: &str, password: &str) -> Result<members::Model, LoginError> {
        let identifier = LoginIdentifier::parse(login)?;
        let column = match identifier {
            LoginIdentifier::Email(_) => members::Column::Email,
            LoginIdentifier::Phone(_) => members::Column::PhoneNumber,
            LoginIdentifier::Username(_) => members::Column::Username,
        };

        let member = members::Entity::find()
            .filter(column.eq(identifier.value()))
            .one(&self.db)
            .await
            .map_err(StoreError::from)?
            .ok_or(LoginError::InvalidCredentials)?;

        if !verify_password(password, &member.password_hash)? {
            tracing::warn!(member_id = %member.id, "login rejected: wrong password");
            return Err(LoginError::InvalidCredentials);
        }
        if !member.status {
            tracing::warn!(member_id = %member.id, "login rejected: member deactivated");
            return Err(LoginError::Deactivated);
        }
        Ok(member)
    }

    /// Whether any admin member exists; the seeder uses it to stay idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn admin_exists(&self) -> StoreResult<bool> {
        Ok(members::Entity::find()
            .filter(members::Column::Role.eq(MemberRole::Admin))
            .one(&self.db)
            .await?
            .is_some())
    }
}
