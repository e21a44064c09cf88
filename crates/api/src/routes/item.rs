//! Item master routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::ItemRepository;
use khata_db::repositories::{ItemInput, UpdateItemInput};
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Item routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/item", get(list_item))
        .route("/item/create", post(create_item))
        .route("/item/update/{id}", put(update_item))
        .route("/item/{id}", get(get_item))
        .route("/item/{id}", delete(delete_item))
}

fn repo(state: &AppState) -> ItemRepository {
    ItemRepository::new((*state.db).clone())
}

/// GET `/item` - List items.
async fn list_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Items fetched successfully", page))
}

/// GET `/item/{id}`
async fn get_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Item fetched successfully", record))
}

/// POST `/item/create`
async fn create_item(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<ItemInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Item created successfully", record))
}

/// PUT `/item/update/{id}`
async fn update_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateItemInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Item updated successfully", record))
}

/// DELETE `/item/{id}`
async fn delete_item(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Item deleted successfully"))
}
