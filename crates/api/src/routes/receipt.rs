//! Receipt routes.
//!
//! Creating, changing or deleting a receipt moves the company cash or bank
//! balance in the same transaction as the write.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::ReceiptRepository;
use khata_db::repositories::ReceiptInput;
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Receipt routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/receipt", get(list_receipt))
        .route("/receipt/create", post(create_receipt))
        .route("/receipt/update/{id}", put(update_receipt))
        .route("/receipt/{id}", get(get_receipt))
        .route("/receipt/{id}", delete(delete_receipt))
}

fn repo(state: &AppState) -> ReceiptRepository {
    ReceiptRepository::new((*state.db).clone())
}

/// GET `/receipt` - List receipts, newest first.
async fn list_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Receipts fetched successfully", page))
}

/// GET `/receipt/{id}`
async fn get_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Receipt fetched successfully", record))
}

/// POST `/receipt/create`
async fn create_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<ReceiptInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Receipt created successfully", record))
}

/// PUT `/receipt/update/{id}`
async fn update_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<ReceiptInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Receipt updated successfully", record))
}

/// DELETE `/receipt/{id}`
async fn delete_receipt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Receipt deleted successfully"))
}
