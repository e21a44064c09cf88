//! Error rendering for handlers.
//!
//! Every failure leaves the API as
//! `{ "status", "statusCode", "message", "errorCode" }`, with `status` set to
//! `fail` for client errors and `error` for server errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use khata_db::StoreError;
use khata_db::repositories::LoginError;
use khata_shared::AppError;
use khata_shared::jwt::JwtError;
use serde::Serialize;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Handler error, rendered as the JSON error envelope.
#[derive(Debug)]
pub struct ApiError(pub AppError);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status: &'static str,
    status_code: u16,
    message: &'a str,
    error_code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            status: if self.0.is_client_error() { "fail" } else { "error" },
            status_code: code,
            message: self.0.message(),
            error_code: self.0.error_code(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err.into())
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        Self(err.into())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => Self(AppError::Unauthorized("Token has expired".to_string())),
            JwtError::Invalid | JwtError::DecodingError(_) => {
                Self(AppError::Unauthorized("Invalid or malformed token".to_string()))
            }
            JwtError::EncodingError(detail) => {
                tracing::error!(%detail, "failed to sign access token");
                Self(AppError::Internal(detail))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_client_error_envelope() {
        let (status, body) = render(StoreError::NotFound("Party").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "fail");
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], "Party not found");
        assert_eq!(body["errorCode"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_server_error_hides_detail() {
        let (status, body) = render(AppError::Database("connection reset".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let (status, body) = render(JwtError::Expired.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Token has expired");
    }
}
