//! Item category routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::CategoryRepository;
use khata_db::repositories::CategoryInput;
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Category routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/category", get(list_category))
        .route("/category/create", post(create_category))
        .route("/category/update/{id}", put(update_category))
        .route("/category/{id}", get(get_category))
        .route("/category/{id}", delete(delete_category))
}

fn repo(state: &AppState) -> CategoryRepository {
    CategoryRepository::new((*state.db).clone())
}

/// GET `/category` - List categories.
async fn list_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Categories fetched successfully", page))
}

async fn get_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Category fetched successfully", record))
}

async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CategoryInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Category created successfully", record))
}

async fn update_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CategoryInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Category updated successfully", record))
}

async fn delete_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Category deleted successfully"))
}
