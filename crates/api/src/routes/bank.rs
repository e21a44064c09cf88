//! Bank account routes. The stored opening balance is the running balance.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::BankRepository;
use khata_db::repositories::{BankInput, UpdateBankInput};
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Bank routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/bank", get(list_bank))
        .route("/bank/create", post(create_bank))
        .route("/bank/update/{id}", put(update_bank))
        .route("/bank/{id}", get(get_bank))
        .route("/bank/{id}", delete(delete_bank))
}

fn repo(state: &AppState) -> BankRepository {
    BankRepository::new((*state.db).clone())
}

/// GET `/bank` - List bank accounts.
async fn list_bank(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Banks fetched successfully", page))
}

/// GET `/bank/{id}`
async fn get_bank(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Bank fetched successfully", record))
}

/// POST `/bank/create`
async fn create_bank(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<BankInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Bank created successfully", record))
}

/// PUT `/bank/update/{id}`
async fn update_bank(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBankInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Bank updated successfully", record))
}

/// DELETE `/bank/{id}`
async fn delete_bank(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Bank deleted successfully"))
}
