//! Authentication building blocks.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Login identifier classification
//! - Member role definitions and their permissions

mod identifier;
mod password;

pub use identifier::{LoginIdentifier, MIN_PASSWORD_LEN, is_phone, is_username, validate_password};
pub use password::{PasswordError, hash_password, verify_password};

use serde::{Deserialize, Serialize};

/// Roles a member can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Full access, manages members.
    Admin,
    /// Reads every record.
    Manager,
    /// Field staff. No back office access beyond their own profile.
    Salesman,
    /// Reads every record.
    Accountant,
}

impl MemberRole {
    /// Returns true if this role can add, edit and deactivate members.
    #[must_use]
    pub const fn can_manage_members(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if this role can create, update and delete records.
    #[must_use]
    pub const fn can_write_records(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Returns true if this role can list and view records.
    #[must_use]
    pub const fn can_read_records(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager | Self::Accountant)
    }

    /// Lowercase name as stored and as carried in tokens.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Salesman => "salesman",
            Self::Accountant => "accountant",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is unknown.
#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for MemberRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "salesman" => Ok(Self::Salesman),
            "accountant" => Ok(Self::Accountant),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_role_permissions() {
        assert!(MemberRole::Admin.can_manage_members());
        assert!(!MemberRole::Manager.can_manage_members());

        assert!(MemberRole::Admin.can_write_records());
        assert!(!MemberRole::Accountant.can_write_records());
        assert!(!MemberRole::Salesman.can_write_records());

        assert!(MemberRole::Manager.can_read_records());
        assert!(MemberRole::Accountant.can_read_records());
        assert!(!MemberRole::Salesman.can_read_records());
    }

    #[rstest]
    #[case(MemberRole::Admin)]
    #[case(MemberRole::Manager)]
    #[case(MemberRole::Salesman)]
    #[case(MemberRole::Accountant)]
    fn test_role_name_parses_back(#[case] role: MemberRole) {
        assert_eq!(role.to_string().parse::<MemberRole>().unwrap(), role);
    }

    #[test]
    fn test_unknown_role() {
        let err = "owner".parse::<MemberRole>().unwrap_err();
        assert_eq!(err.to_string(), "unknown role: owner");
    }
}
