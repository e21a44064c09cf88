//! Customer and supplier routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::PartyRepository;
use khata_db::repositories::{PartyInput, UpdatePartyInput};
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Party routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/party", get(list_party))
        .route("/party/create", post(create_party))
        .route("/party/update/{id}", put(update_party))
        .route("/party/{id}", get(get_party))
        .route("/party/{id}", delete(delete_party))
}

fn repo(state: &AppState) -> PartyRepository {
    PartyRepository::new((*state.db).clone())
}

/// GET `/party` - List parties.
async fn list_party(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Parties fetched successfully", page))
}

/// GET `/party/{id}`
async fn get_party(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Party fetched successfully", record))
}

/// POST `/party/create`
async fn create_party(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<PartyInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Party created successfully", record))
}

/// PUT `/party/update/{id}`
async fn update_party(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdatePartyInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Party updated successfully", record))
}

/// DELETE `/party/{id}`
async fn delete_party(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Party deleted successfully"))
}
