//! Ledger group routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::GroupRepository;
use khata_db::repositories::{GroupInput, UpdateGroupInput};
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Group routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/group", get(list_group))
        .route("/group/create", post(create_group))
        .route("/group/update/{id}", put(update_group))
        .route("/group/{id}", get(get_group))
        .route("/group/{id}", delete(delete_group))
}

fn repo(state: &AppState) -> GroupRepository {
    GroupRepository::new((*state.db).clone())
}

/// GET `/group` - List ledger groups.
async fn list_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Groups fetched successfully", page))
}

/// GET `/group/{id}`
async fn get_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Group fetched successfully", record))
}

/// POST `/group/create`
async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<GroupInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Group created successfully", record))
}

/// PUT `/group/update/{id}`
async fn update_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateGroupInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Group updated successfully", record))
}

/// DELETE `/group/{id}`
async fn delete_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Group deleted successfully"))
}
