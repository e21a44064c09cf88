//! Member administration and self-service profile updates.

use axum::{
    Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use khata_core::auth::MemberRole;
use khata_db::MemberRepository;
use khata_db::repositories::{CreateMemberInput, UpdateMemberInput};
use khata_shared::AppError;
use khata_shared::types::PageRequest;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::extractors::ValidatedJson;
use crate::middleware::{AuthUser, require};
use crate::response::StandardResponse;
use crate::AppState;

/// Member routes (auth middleware is applied by the caller).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/members", get(list_members))
        .route("/members/create", post(create_member))
        .route("/members/add", post(create_member))
        .route("/members/update", put(update_self))
        .route("/members/update/{id}", put(update_member))
        .route("/members/{id}", get(get_member))
        .route("/members/{id}", delete(deactivate_member))
}

fn repo(state: &AppState) -> MemberRepository {
    MemberRepository::new((*state.db).clone())
}

/// GET `/members` - List members.
async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_manage_members)?;
    let members = repo(&state).list(&page).await?;
    Ok(StandardResponse::ok("Members fetched successfully", members))
}

/// GET `/members/{id}` - One member.
async fn get_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_manage_members)?;
    let member = repo(&state).get(id).await?;
    Ok(StandardResponse::ok("Member fetched successfully", member))
}

/// POST `/members/create` - Add a member.
async fn create_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateMemberInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_manage_members)?;
    let member = repo(&state).create(payload).await?;
    Ok(StandardResponse::created("Member added successfully", member))
}

/// PUT `/members/update/{id}` - Update any member.
async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateMemberInput>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_manage_members)?;
    if id == auth.id() && payload.status == Some(false) {
        return Err(ApiError(AppError::BusinessRule(
            "You cannot deactivate your own account".to_string(),
        )));
    }
    let member = repo(&state).update(id, payload).await?;
    Ok(StandardResponse::ok("Member updated successfully", member))
}

/// PUT `/members/update` - The signed-in member edits their own profile.
async fn update_self(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateMemberInput>,
) -> ApiResult<impl IntoResponse> {
    if payload.role.is_some() || payload.status.is_some() {
        return Err(ApiError(AppError::Forbidden(
            "Role and status can only be changed by an administrator".to_string(),
        )));
    }
    let member = repo(&state).update(auth.id(), payload).await?;
    Ok(StandardResponse::ok("Profile updated successfully", member))
}

/// DELETE `/members/{id}` - Deactivate a member.
async fn deactivate_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    require(&auth, MemberRole::can_manage_members)?;
    if id == auth.id() {
        return Err(ApiError(AppError::BusinessRule(
            "You cannot deactivate your own account".to_string(),
        )));
    }
    let member = repo(&state).deactivate(id).await?;
    Ok(StandardResponse::ok("Member deactivated successfully", member))
}
