//! Authentication middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use khata_core::auth::MemberRole;
use khata_db::MemberRepository;
use khata_shared::AppError;
use khata_shared::types::MemberId;

use crate::AppState;
use crate::error::{ApiError, ApiResult};

/// Cookie carrying the access token set at login.
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
}

/// Validates the access token and loads the member behind it.
///
/// The token comes from the `Authorization` header or, failing that, the
/// `accessToken` cookie. A token for a member that was deactivated or
/// removed after login is refused.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let header_token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .map(ToString::to_string);
    let token = header_token
        .or_else(|| jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string()))
        .ok_or_else(|| ApiError(AppError::Unauthorized("Not authenticated".to_string())))?;

    let claims = state.jwt_service.validate_token(&token)?;

    let member = MemberRepository::new((*state.db).clone())
        .find_active(claims.member_id().into_inner())
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("User not found or blocked".to_string())))?;

    request.extensions_mut().insert(AuthUser {
        member_id: MemberId::from_uuid(member.id),
        role: member.role.into(),
    });
    Ok(next.run(request).await)
}

/// The member making the request.
///
/// The role is read from the database on every request, so a role change
/// applies without a new login.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// Member ID.
    pub member_id: MemberId,
    /// Current role.
    pub role: MemberRole,
}

impl AuthUser {
    /// Returns the member ID as a raw UUID.
    #[must_use]
    pub const fn id(&self) -> uuid::Uuid {
        self.member_id.into_inner()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .copied()
            .ok_or_else(|| ApiError(AppError::Unauthorized("Authentication required".to_string())))
    }
}

/// Refuses the request unless the member's role passes `allowed`.
///
/// ```ignore
/// require(&auth, MemberRole::can_write_records)?;
/// ```
pub fn require(auth: &AuthUser, allowed: impl Fn(&MemberRole) -> bool) -> ApiResult<()> {
    if allowed(&auth.role) {
        return Ok(());
    }
    tracing::warn!(member_id = %auth.member_id, role = %auth.role, "request refused for role");
    Err(ApiError(AppError::Forbidden(
        "You do not have permission to perform this action".to_string(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("bearer abc", Some("abc"))]
    #[case("Basic abc", None)]
    fn test_extract_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_bearer_token(header), expected);
    }

    #[rstest]
    #[case(MemberRole::Admin, true)]
    #[case(MemberRole::Manager, false)]
    #[case(MemberRole::Salesman, false)]
    fn test_require_write(#[case] role: MemberRole, #[case] allowed: bool) {
        let auth = AuthUser {
            member_id: MemberId::new(),
            role,
        };
        assert_eq!(require(&auth, MemberRole::can_write_records).is_ok(), allowed);
    }
}
