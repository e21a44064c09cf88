//! Token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::MemberId;

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (member ID).
    pub sub: MemberId,
    /// Member role at the time of login.
    pub role: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a member.
    #[must_use]
    pub fn new(member_id: MemberId, role: &str, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: member_id,
            role: role.to_string(),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the member ID from claims.
    #[must_use]
    pub const fn member_id(&self) -> MemberId {
        self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_claims_serialize_sub_as_plain_uuid() {
        let member_id = MemberId::new();
        let claims = Claims::new(member_id, "accountant", Utc::now() + Duration::hours(1));

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["sub"], member_id.to_string());
        assert_eq!(json["role"], "accountant");
        assert!(claims.iat <= claims.exp);
    }
}
