//! Deposits into and withdrawals from bank accounts.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::BankEntryRepository;
use khata_db::repositories::BankEntryInput;
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Bank entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bank-entry", get(list_bank_entry))
        .route("/bank-entry/create", post(create_bank_entry))
        .route("/bank-entry/update/{id}", put(update_bank_entry))
        .route("/bank-entry/{id}", get(get_bank_entry))
        .route("/bank-entry/{id}", delete(delete_bank_entry))
}

fn repo(state: &AppState) -> BankEntryRepository {
    BankEntryRepository::new((*state.db).clone())
}

/// GET `/bank-entry` - List bank entries, newest first.
async fn list_bank_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Bank entries fetched successfully", page))
}

/// GET `/bank-entry/{id}`
async fn get_bank_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Bank entry fetched successfully", record))
}

/// POST `/bank-entry/create`
async fn create_bank_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<BankEntryInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Bank entry created successfully", record))
}

/// PUT `/bank-entry/update/{id}`
async fn update_bank_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<BankEntryInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Bank entry updated successfully", record))
}

/// DELETE `/bank-entry/{id}`
async fn delete_bank_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Bank entry deleted successfully"))
}
