//! Payment routes. Payments debit the paying cash or bank balance.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::PaymentRepository;
use khata_db::repositories::PaymentInput;
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Payment routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payment", get(list_payment))
        .route("/payment/create", post(create_payment))
        .route("/payment/update/{id}", put(update_payment))
        .route("/payment/{id}", get(get_payment))
        .route("/payment/{id}", delete(delete_payment))
}

fn repo(state: &AppState) -> PaymentRepository {
    PaymentRepository::new((*state.db).clone())
}

/// GET `/payment` - List payments, newest first.
async fn list_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Payments fetched successfully", page))
}

/// GET `/payment/{id}`
async fn get_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let record = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Payment fetched successfully", record))
}

/// POST `/payment/create`
async fn create_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<PaymentInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Payment created successfully", record))
}

/// PUT `/payment/update/{id}`
async fn update_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<PaymentInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let record = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Payment updated successfully", record))
}

/// DELETE `/payment/{id}`
async fn delete_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    repo(&state).delete(id).await?;
    Ok(StandardResponse::message("Payment deleted successfully"))
}
