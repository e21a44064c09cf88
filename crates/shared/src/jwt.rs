//! JWT token generation and validation.
//!
//! Members receive a single access token at login; there is no refresh flow.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use crate::auth::Claims;
use crate::config::JwtConfig;
use crate::types::MemberId;

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    EncodingError(String),

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,

    /// Token is invalid.
    #[error("invalid token")]
    Invalid,
}

/// JWT service for token operations.
#[derive(Clone)]
pub struct JwtService {
    expiry_secs: i64,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiry_secs", &self.expiry_secs)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    /// Creates a new JWT service with the given configuration.
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            expiry_secs: i64::try_from(config.access_token_expiry_secs).unwrap_or(i64::MAX),
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    /// Generates an access token for a member.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::EncodingError` if token generation fails.
    pub fn generate_access_token(&self, member_id: MemberId, role: &str) -> Result<String, JwtError> {
        let expires_at = Utc::now() + Duration::seconds(self.expiry_secs);
        let claims = Claims::new(member_id, role, expires_at);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired and
    /// `JwtError::Invalid` if the signature or shape is wrong.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        use jsonwebtoken::errors::ErrorKind;

        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidToken | ErrorKind::InvalidSignature => JwtError::Invalid,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Returns the access token lifetime in seconds.
    #[must_use]
    pub const fn access_token_expires_in(&self) -> i64 {
        self.expiry_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_expiry(secs: u64) -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            access_token_expiry_secs: secs,
        })
    }

    #[test]
    fn test_token_carries_member_and_role() {
        let service = service_with_expiry(3600);
        let member_id = MemberId::new();

        let token = service.generate_access_token(member_id, "admin").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.member_id(), member_id);
        assert_eq!(claims.role, "admin");
        assert!((3599..=3600).contains(&(claims.exp - claims.iat)));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = service_with_expiry(3600);
        let other = JwtService::new(&JwtConfig {
            secret: "another-secret".to_string(),
            access_token_expiry_secs: 3600,
        });

        let token = issuer.generate_access_token(MemberId::new(), "manager").unwrap();
        assert!(matches!(other.validate_token(&token), Err(JwtError::Invalid)));
    }

    #[test]
    fn test_expired_token() {
        let service = service_with_expiry(3600);
        let claims = Claims::new(MemberId::new(), "admin", Utc::now() - Duration::hours(2));
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();

        assert!(matches!(service.validate_token(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn test_garbage_token() {
        let service = service_with_expiry(3600);
        assert!(service.validate_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_debug_hides_keys() {
        let rendered = format!("{:?}", service_with_expiry(60));
        assert!(rendered.contains("[hidden]"));
        assert!(!rendered.contains("test-secret"));
    }
}
