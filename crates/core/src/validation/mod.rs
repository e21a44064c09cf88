//! Input rules shared by every document type.
//!
//! Repositories compose these helpers before they touch storage, so a
//! rejected document never reaches a transaction.

mod documents;

pub use documents::{
    JournalLine, TradeLine, TradeTotals, bank_reference, validate_bank_entry,
    validate_cash_document, validate_damage_stock, validate_journal, validate_trade_document,
    validate_vehicle_stock,
};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::settlement::SettlementError;

/// Input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required value is missing or blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// Amount or quantity must be above zero.
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),

    /// Amount cannot be below zero.
    #[error("{0} cannot be negative")]
    Negative(&'static str),

    /// A list needs at least one entry.
    #[error("At least one {0} is required")]
    Empty(&'static str),

    /// Value has the wrong shape.
    #[error("{field} must be {expected}")]
    InvalidFormat {
        /// Offending field.
        field: &'static str,
        /// Description of the accepted shape.
        expected: &'static str,
    },

    /// Value is shorter than allowed.
    #[error("{field} must be at least {min} characters")]
    TooShort {
        /// Offending field.
        field: &'static str,
        /// Minimum length.
        min: usize,
    },

    /// Settlement could not be described.
    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

/// Trims `value` and rejects blanks.
///
/// # Errors
///
/// Returns `ValidationError::Required` when nothing is left after trimming.
pub fn required_text(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional value, mapping blanks to `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

/// Money is stored with two decimal places.
pub const MONEY_SCALE: u32 = 2;

/// Rejects amounts with more precision than the money columns keep.
///
/// # Errors
///
/// Returns `ValidationError::InvalidFormat` past two decimal places.
pub fn money(field: &'static str, amount: Decimal) -> Result<Decimal, ValidationError> {
    if amount.normalize().scale() > MONEY_SCALE {
        return Err(ValidationError::InvalidFormat {
            field,
            expected: "at most 2 decimal places",
        });
    }
    Ok(amount)
}

/// # Errors
///
/// Returns `ValidationError::NotPositive` for zero or negative amounts and
/// `ValidationError::InvalidFormat` for sub-cent precision.
pub fn positive(field: &'static str, amount: Decimal) -> Result<Decimal, ValidationError> {
    money(field, amount)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(amount)
}

/// # Errors
///
/// Returns `ValidationError::Negative` for amounts below zero and
/// `ValidationError::InvalidFormat` for sub-cent precision.
pub fn non_negative(field: &'static str, amount: Decimal) -> Result<Decimal, ValidationError> {
    money(field, amount)?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::Negative(field));
    }
    Ok(amount)
}

/// # Errors
///
/// Returns `ValidationError::NotPositive` for quantities below one.
pub fn positive_quantity(field: &'static str, quantity: i32) -> Result<i32, ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_required_text_trims() {
        assert_eq!(required_text("invoiceNo", "  INV-1 ").unwrap(), "INV-1");
        assert_eq!(
            required_text("invoiceNo", "   "),
            Err(ValidationError::Required("invoiceNo"))
        );
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(Some("  ")), None);
        assert_eq!(optional_text(Some(" x ")), Some("x".to_string()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn test_amount_bounds() {
        assert!(positive("amount", dec!(0.01)).is_ok());
        assert_eq!(positive("amount", Decimal::ZERO), Err(ValidationError::NotPositive("amount")));
        assert!(non_negative("discount", Decimal::ZERO).is_ok());
        assert_eq!(non_negative("discount", dec!(-1)), Err(ValidationError::Negative("discount")));
        assert_eq!(positive_quantity("quantity", 0), Err(ValidationError::NotPositive("quantity")));
    }

    #[rstest]
    #[case(dec!(10), true)]
    #[case(dec!(10.5), true)]
    #[case(dec!(10.25), true)]
    #[case(dec!(10.250), true)]
    #[case(dec!(0.005), false)]
    #[case(dec!(-3.125), false)]
    fn test_money_scale(#[case] amount: Decimal, #[case] accepted: bool) {
        assert_eq!(money("amount", amount).is_ok(), accepted);
    }

    #[test]
    fn test_sub_cent_amounts_are_rejected() {
        let expected = Err(ValidationError::InvalidFormat {
            field: "amount",
            expected: "at most 2 decimal places",
        });
        assert_eq!(positive("amount", dec!(0.005)), expected);
        assert_eq!(non_negative("amount", dec!(1.001)), expected);
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::Empty("item").to_string(), "At least one item is required");
        assert_eq!(
            ValidationError::from(SettlementError::MissingBank).to_string(),
            "Bank ID is required for bank payments"
        );
    }
}
