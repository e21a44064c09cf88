//! Login, logout and the current member.

use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use khata_core::auth::MemberRole;
use khata_db::MemberRepository;
use khata_db::entities::members;
use khata_shared::types::MemberId;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::extractors::ValidatedJson;
use crate::middleware::{ACCESS_TOKEN_COOKIE, AuthUser};
use crate::response::StandardResponse;
use crate::AppState;

/// Public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

/// Auth routes that need a signed-in member.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

/// Login body. `username` may hold a username, an email or a phone number.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username, email or phone number.
    #[validate(length(min = 1))]
    pub username: String,
    /// Plain text password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Member profile returned at login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Member ID.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Username.
    pub username: String,
    /// Email.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Profile image.
    pub image: Option<String>,
    /// Role.
    pub role: String,
    /// Active flag.
    pub status: bool,
    /// Address.
    pub address: Option<String>,
    /// Access token, also set as the `accessToken` cookie.
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// POST `/auth/login` - Checks credentials and issues an access token.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let member = MemberRepository::new((*state.db).clone())
        .authenticate(&payload.username, &payload.password)
        .await?;

    let role = MemberRole::from(member.role);
    let token = state
        .jwt_service
        .generate_access_token(MemberId::from_uuid(member.id), role.as_str())?;

    let cookie = Cookie::build((ACCESS_TOKEN_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .secure(state.cookie_secure)
        .same_site(SameSite::Lax);

    info!(member_id = %member.id, role = %role, "member logged in");

    let expires_in = state.jwt_service.access_token_expires_in();
    let response = login_response(member, role.as_str(), token, expires_in);
    Ok((jar.add(cookie), StandardResponse::ok("Login successful", response)))
}

fn login_response(member: members::Model, role: &str, token: String, expires_in: i64) -> LoginResponse {
    LoginResponse {
        user_id: member.id,
        name: member.name,
        username: member.username,
        email: member.email,
        phone_number: member.phone_number,
        image: member.image,
        role: role.to_string(),
        status: member.status,
        address: member.address,
        token,
        expires_in,
    }
}

/// POST `/auth/logout` - Clears the session cookie.
async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.remove(Cookie::build(ACCESS_TOKEN_COOKIE).path("/"));
    (jar, StandardResponse::message("Logout successful"))
}

/// GET `/auth/me` - The signed-in member.
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<impl IntoResponse> {
    let member = MemberRepository::new((*state.db).clone()).get(auth.id()).await?;
    Ok(StandardResponse::ok("Profile fetched", member))
}
