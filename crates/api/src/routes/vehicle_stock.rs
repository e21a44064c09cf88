//! Stock loaded onto or taken off vehicles.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::VehicleStockRepository;
use khata_db::repositories::VehicleStockInput;
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Vehicle stock routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vehicle-stock", get(list_vehicle_stock))
        .route("/vehicle-stock/create", post(create_vehicle_stock))
        .route("/vehicle-stock/update/{id}", put(update_vehicle_stock))
        .route("/vehicle-stock/{id}", get(get_vehicle_stock))
        .route("/vehicle-stock/{id}", delete(delete_vehicle_stock))
}

fn repo(state: &AppState) -> VehicleStockRepository {
    VehicleStockRepository::new((*state.db).clone())
}

/// GET `/vehicle-stock` - List vehicle stock movements.
async fn list_vehicle_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Vehicle stocks fetched successfully", page))
}

/// GET `/vehicle-stock/{id}`
async fn get_vehicle_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Vehicle stock fetched successfully", record))
}

/// POST `/vehicle-stock/create`
async fn create_vehicle_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<VehicleStockInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Vehicle stock created successfully", record))
}

/// PUT `/vehicle-stock/update/{id}`
async fn update_vehicle_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<VehicleStockInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Vehicle stock updated successfully", record))
}

/// DELETE `/vehicle-stock/{id}`
async fn delete_vehicle_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Vehicle stock deleted successfully"))
}
