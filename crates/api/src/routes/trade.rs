//! Sales, purchases and their returns.
//!
//! The four kinds share one handler set. Each kind gets its own path prefix
//! and carries its [`TradeKind`] to the handlers as a request extension.

use axum::{
    Extension, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_core::settlement::DocumentKind;
use khata_db::TradeRepository;
use khata_db::entities::sea_orm_active_enums::TradeKind;
use khata_db::repositories::TradeDocumentInput;
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Routes for every trade document kind.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(kind_routes("sale", TradeKind::Sale))
        .merge(kind_routes("purchase", TradeKind::Purchase))
        .merge(kind_routes("sale-return", TradeKind::SaleReturn))
        .merge(kind_routes("purchase-return", TradeKind::PurchaseReturn))
}

fn kind_routes(prefix: &str, kind: TradeKind) -> Router<AppState> {
    Router::new()
        .route(&format!("/{prefix}"), get(list_documents))
        .route(&format!("/{prefix}/create"), post(create_document))
        .route(&format!("/{prefix}/update/{{id}}"), put(update_document))
        .route(&format!("/{prefix}/{{id}}"), get(get_document))
        .route(&format!("/{prefix}/{{id}}"), delete(delete_document))
        .layer(Extension(kind))
}

fn label(kind: TradeKind) -> &'static str {
    DocumentKind::from(kind).label()
}

/// GET `/{kind}` - Documents of one kind, newest first.
async fn list_documents(
    State(state): State<AppState>,
    Extension(kind): Extension<TradeKind>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let page = TradeRepository::new((*state.db).clone()).list(kind, &page).await?;
    Ok(StandardResponse::ok(format!("{} records fetched successfully", label(kind)), page))
}

/// GET `/{kind}/{id}` - One document with its lines.
async fn get_document(
    State(state): State<AppState>,
    Extension(kind): Extension<TradeKind>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let document = TradeRepository::new((*state.db).clone()).get(kind, id).await?;
    Ok(StandardResponse::ok(format!("{} fetched successfully", label(kind)), document))
}

/// POST `/{kind}/create` - Records a document and settles it.
async fn create_document(
    State(state): State<AppState>,
    Extension(kind): Extension<TradeKind>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<TradeDocumentInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let document = TradeRepository::new((*state.db).clone())
        .create(kind, payload)
        .await?;
    Ok(StandardResponse::created(format!("{} created successfully", label(kind)), document))
}

/// PUT `/{kind}/update/{id}` - Replaces a document and moves balances by the difference.
async fn update_document(
    State(state): State<AppState>,
    Extension(kind): Extension<TradeKind>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<TradeDocumentInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let document = TradeRepository::new((*state.db).clone())
        .update(kind, id, payload)
        .await?;
    Ok(StandardResponse::ok(format!("{} updated successfully", label(kind)), document))
}

/// DELETE `/{kind}/{id}` - Deletes a document and reverses its settlement.
async fn delete_document(
    State(state): State<AppState>,
    Extension(kind): Extension<TradeKind>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    TradeRepository::new((*state.db).clone()).delete(kind, id).await?;
    Ok(StandardResponse::message(format!("{} deleted successfully", label(kind))))
}
