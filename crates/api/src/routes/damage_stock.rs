//! Damaged stock records.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::DamageStockRepository;
use khata_db::repositories::DamageStockInput;
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Damage stock routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/damage-stock", get(list_damage_stock))
        .route("/damage-stock/create", post(create_damage_stock))
        .route("/damage-stock/update/{id}", put(update_damage_stock))
        .route("/damage-stock/{id}", get(get_damage_stock))
        .route("/damage-stock/{id}", delete(delete_damage_stock))
}

fn repo(state: &AppState) -> DamageStockRepository {
    DamageStockRepository::new((*state.db).clone())
}

/// GET `/damage-stock` - List damage records.
async fn list_damage_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Damage stocks fetched successfully", page))
}

async fn get_damage_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Damage stock fetched successfully", record))
}

async fn create_damage_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<DamageStockInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Damage stock created successfully", record))
}

async fn update_damage_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<DamageStockInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Damage stock updated successfully", record))
}

async fn delete_damage_stock(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Damage stock deleted successfully"))
}
