//! Journal routes. Journals are recorded as entered and move no balance.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::JournalRepository;
use khata_db::repositories::JournalInput;
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Journal routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/journal", get(list_journal))
        .route("/journal/create", post(create_journal))
        .route("/journal/update/{id}", put(update_journal))
        .route("/journal/{id}", get(get_journal))
        .route("/journal/{id}", delete(delete_journal))
}

fn repo(state: &AppState) -> JournalRepository {
    JournalRepository::new((*state.db).clone())
}

/// GET `/journal` - List journals, newest first.
async fn list_journal(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Journals fetched successfully", page))
}

/// GET `/journal/{id}`
async fn get_journal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Journal fetched successfully", record))
}

/// POST `/journal/create`
async fn create_journal(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<JournalInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Journal created successfully", record))
}

/// PUT `/journal/update/{id}`
async fn update_journal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<JournalInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Journal updated successfully", record))
}

/// DELETE `/journal/{id}`
async fn delete_journal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Journal deleted successfully"))
}
