//! Stored balances: applying effect plans and reading the results.
//!
//! The company cash balance lives in `company_details.opening_bal` and each
//! bank balance in `banks.opening_bal`. Effects are applied as SQL increments
//! so a plan never reads a balance before writing it.

use khata_core::settlement::{BalanceAccount, EffectPlan, PaymentMode, Settlement};
use khata_shared::types::BankId;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;
use uuid::Uuid;

use super::find_required;
use crate::entities::{banks, company_details};
use crate::error::{StoreError, StoreResult};

/// Applies every effect of `plan` on `conn`, normally an open transaction.
///
/// # Errors
///
/// Returns `StoreError::NotFound` when the company record or a bank row is
/// missing; the caller's transaction is then dropped and rolled back.
pub(crate) async fn apply_plan<C: ConnectionTrait>(conn: &C, plan: &EffectPlan) -> StoreResult<()> {
    for effect in plan.effects() {
        let (rows, label) = match effect.account {
            BalanceAccount::Company => {
                let result = company_details::Entity::update_many()
                    .col_expr(
                        company_details::Column::OpeningBal,
                        Expr::col(company_details::Column::OpeningBal).add(effect.delta),
                    )
                    .exec(conn)
                    .await?;
                (result.rows_affected, "Company")
            }
            BalanceAccount::Bank(bank_id) => {
                let result = banks::Entity::update_many()
                    .col_expr(
                        banks::Column::OpeningBal,
                        Expr::col(banks::Column::OpeningBal).add(effect.delta),
                    )
                    .filter(banks::Column::Id.eq(bank_id.into_inner()))
                    .exec(conn)
                    .await?;
                (result.rows_affected, "Bank")
            }
        };

        if rows == 0 {
            return Err(StoreError::NotFound(label));
        }
        tracing::debug!(account = ?effect.account, delta = %effect.delta, "balance effect applied");
    }
    Ok(())
}

/// Settlement of a document that is already stored.
///
/// A stored bank document without its bank cannot be reversed safely, so this
/// is a rule violation rather than an input error.
pub(crate) fn stored_settlement(
    mode: PaymentMode,
    bank_id: Option<Uuid>,
    amount: Decimal,
) -> StoreResult<Settlement> {
    Settlement::new(mode, bank_id.map(BankId::from_uuid), amount)
        .map_err(|err| StoreError::Rule(format!("Stored document cannot be reversed: {err}")))
}

/// Checks that the bank a settlement names exists.
pub(crate) async fn ensure_settlement_target<C: ConnectionTrait>(
    conn: &C,
    settlement: &Settlement,
) -> StoreResult<()> {
    if let Some(bank_id) = settlement.bank_id() {
        find_required::<banks::Entity, _>(conn, bank_id.into_inner(), "Bank").await?;
    }
    Ok(())
}

/// Balance of one bank account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BankBalance {
    /// Bank row id.
    pub bank_id: Uuid,
    /// Bank name.
    pub bank_name: String,
    /// Account number.
    pub account_no: String,
    /// Current balance.
    pub balance: Decimal,
}

/// Current company and bank balances.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    /// Company cash balance; `None` before the company record exists.
    pub company: Option<Decimal>,
    /// Every bank account, by bank name.
    pub banks: Vec<BankBalance>,
}

/// Read access to stored balances.
#[derive(Debug, Clone)]
pub struct BalanceRepository {
    db: DatabaseConnection,
}

impl BalanceRepository {
    /// Creates a new balance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Reads the current balance of one account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the account does not exist.
    pub async fn balance(&self, account: BalanceAccount) -> StoreResult<Decimal> {
        match account {
            BalanceAccount::Company => company_details::Entity::find()
                .one(&self.db)
                .await?
                .map(|company| company.opening_bal)
                .ok_or(StoreError::NotFound("Company")),
            BalanceAccount::Bank(bank_id) => banks::Entity::find_by_id(bank_id.into_inner())
                .one(&self.db)
                .await?
                .map(|bank| bank.opening_bal)
                .ok_or(StoreError::NotFound("Bank")),
        }
    }

    /// Snapshot of every balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn summary(&self) -> StoreResult<BalanceSummary> {
        let company = company_details::Entity::find()
            .one(&self.db)
            .await?
            .map(|company| company.opening_bal);

        let banks = banks::Entity::find()
            .order_by_asc(banks::Column::BankName)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|bank| BankBalance {
                bank_id: bank.id,
                bank_name: bank.bank_name,
                account_no: bank.account_no,
                balance: bank.opening_bal,
            })
            .collect();

        Ok(BalanceSummary { company, banks })
    }
}
