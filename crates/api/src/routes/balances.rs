//! Current cash and bank balances.

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use khata_core::auth::MemberRole;
use khata_db::BalanceRepository;

use crate::error::ApiResult;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Balance routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/balances", get(summary))
}

/// GET `/balances` - Company cash plus every bank account.
async fn summary(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_read_records)?;
    let summary = BalanceRepository::new((*state.db).clone()).summary().await?;
    Ok(StandardResponse::ok("Balances fetched successfully", summary))
}
