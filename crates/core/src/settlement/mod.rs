//! Balance effects of settled documents.
//!
//! Sales, purchases, their returns, receipts and payments are settled either
//! in cash or through a bank account. Settling moves money into or out of
//! the company cash balance or one bank balance. Bank entries move money
//! between the two.
//!
//! Nothing here touches storage. A document is described as a [`Posting`],
//! and an [`EffectPlan`] says how much each balance has to move when the
//! posting is created, replaced or removed. The storage layer applies a plan
//! inside the same database transaction as the document write, so a balance
//! always equals its opening value plus every plan applied to it.
//!
//! Negative balances are allowed.

pub mod book;
pub mod error;
pub mod plan;
pub mod posting;

#[cfg(test)]
mod plan_props;

pub use book::BalanceBook;
pub use error::SettlementError;
pub use plan::{BalanceAccount, BalanceEffect, EffectPlan};
pub use posting::{Direction, DocumentKind, PaymentMode, Posting, Settlement, TransferDirection};
