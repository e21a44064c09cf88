//! Settlement errors.

use thiserror::Error;

/// Errors raised while describing a settlement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// Bank mode without a bank account.
    #[error("Bank ID is required for bank payments")]
    MissingBank,

    /// Settled amounts are never negative; direction comes from the document kind.
    #[error("Settled amount cannot be negative")]
    NegativeAmount,
}
