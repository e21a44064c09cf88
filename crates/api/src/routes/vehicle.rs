//! Vehicle routes.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::VehicleRepository;
use khata_db::repositories::{UpdateVehicleInput, VehicleInput};
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Vehicle routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vehicle", get(list_vehicle))
        .route("/vehicle/create", post(create_vehicle))
        .route("/vehicle/update/{id}", put(update_vehicle))
        .route("/vehicle/{id}", get(get_vehicle))
        .route("/vehicle/{id}", delete(delete_vehicle))
}

fn repo(state: &AppState) -> VehicleRepository {
    VehicleRepository::new((*state.db).clone())
}

/// GET `/vehicle` - List vehicles.
async fn list_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Vehicles fetched successfully", page))
}

/// GET `/vehicle/{id}`
async fn get_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Vehicle fetched successfully", record))
}

/// POST `/vehicle/create`
async fn create_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<VehicleInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Vehicle created successfully", record))
}

/// PUT `/vehicle/update/{id}`
async fn update_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateVehicleInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Vehicle updated successfully", record))
}

/// DELETE `/vehicle/{id}`
async fn delete_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Vehicle deleted successfully"))
}
