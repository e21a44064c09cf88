//! Login identifier classification.
//!
//! Members sign in with whichever of email, phone number or username they
//! remember; the identifier's shape decides which column is looked up.

use validator::ValidateEmail;

use crate::validation::ValidationError;

/// Shortest password accepted at login and on member creation.
pub const MIN_PASSWORD_LEN: usize = 4;

/// A classified login name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginIdentifier {
    /// Matches the member's email.
    Email(String),
    /// Matches the member's phone number: optional `+`, then 10 to 15 digits.
    Phone(String),
    /// Matches the member's username: 3 to 20 of `[A-Za-z0-9_]`.
    Username(String),
}

impl LoginIdentifier {
    /// Classifies a raw login name. Email wins over phone, phone over username.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` when the input fits none of the shapes.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(ValidationError::Required("login"));
        }

        if value.contains('@') && value.validate_email() {
            Ok(Self::Email(value.to_lowercase()))
        } else if is_phone(value) {
            Ok(Self::Phone(value.to_string()))
        } else if is_username(value) {
            Ok(Self::Username(value.to_string()))
        } else {
            Err(ValidationError::InvalidFormat {
                field: "login",
                expected: "an email, phone number or username",
            })
        }
    }

    /// Column-facing value.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Email(v) | Self::Phone(v) | Self::Username(v) => v,
        }
    }
}

/// Optional `+` followed by 10 to 15 ASCII digits.
#[must_use]
pub fn is_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    (10..=15).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
}

/// 3 to 20 characters of `[A-Za-z0-9_]`.
#[must_use]
pub fn is_username(value: &str) -> bool {
    (3..=20).contains(&value.len()) && value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Enforces the minimum password length.
///
/// # Errors
///
/// Returns `ValidationError::TooShort` for passwords under `MIN_PASSWORD_LEN` characters.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password",
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Owner@Shop.com", LoginIdentifier::Email("owner@shop.com".into()))]
    #[case("+9779812345678", LoginIdentifier::Phone("+9779812345678".into()))]
    #[case("9812345678", LoginIdentifier::Phone("9812345678".into()))]
    #[case(" ram_01 ", LoginIdentifier::Username("ram_01".into()))]
    fn test_classifies(#[case] raw: &str, #[case] expected: LoginIdentifier) {
        assert_eq!(LoginIdentifier::parse(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("ab")]
    #[case("has space")]
    #[case("not@@email")]
    #[case("a_very_long_username_over_twenty")]
    fn test_rejects(#[case] raw: &str) {
        assert!(LoginIdentifier::parse(raw).is_err());
    }

    #[test]
    fn test_short_digit_string_is_a_username() {
        // Too short for a phone number, still a valid username.
        assert_eq!(
            LoginIdentifier::parse("12345").unwrap(),
            LoginIdentifier::Username("12345".into())
        );
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("1234").is_ok());
        let err = validate_password("123").unwrap_err();
        assert_eq!(err.to_string(), "password must be at least 4 characters");
    }
}
