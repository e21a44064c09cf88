//! The company record.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::CompanyRepository;
use khata_db::repositories::{CompanyInput, UpdateCompanyInput};

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Company routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/company", get(get_company))
        .route("/company/create", post(create_company))
        .route("/company/update", put(update_company))
}

/// GET `/company` - Company details and current cash balance.
async fn get_company(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let company = CompanyRepository::new((*state.db).clone()).get().await?;
    Ok(StandardResponse::ok("Company details fetched successfully", company))
}

/// POST `/company/create` - Record the company once.
async fn create_company(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CompanyInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let company = CompanyRepository::new((*state.db).clone()).create(payload).await?;
    Ok(StandardResponse::created("Company details added successfully", company))
}

/// PUT `/company/update` - Partial update.
async fn update_company(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateCompanyInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_write_records)?;
    let company = CompanyRepository::new((*state.db).clone()).update(payload).await?;
    Ok(StandardResponse::ok("Company details updated successfully", company))
}
