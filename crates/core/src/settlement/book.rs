//! In-memory balances.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::plan::{BalanceAccount, EffectPlan};

/// Opening balances plus everything applied since.
///
/// Mirrors what storage does with `opening_bal = opening_bal + delta`;
/// used to check that a sequence of document writes lands where it should.
#[derive(Debug, Clone, Default)]
pub struct BalanceBook {
    opening: BTreeMap<BalanceAccount, Decimal>,
    applied: BTreeMap<BalanceAccount, Decimal>,
}

impl BalanceBook {
    /// Empty book; unknown accounts open at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an opening balance.
    #[must_use]
    pub fn with_opening(mut self, account: BalanceAccount, amount: Decimal) -> Self {
        self.opening.insert(account, amount);
        self
    }

    /// Applies every effect in `plan`.
    pub fn apply(&mut self, plan: &EffectPlan) {
        for effect in plan.effects() {
            *self.applied.entry(effect.account).or_default() += effect.delta;
        }
    }

    /// Sum of all deltas applied to `account`.
    #[must_use]
    pub fn applied(&self, account: BalanceAccount) -> Decimal {
        self.applied.get(&account).copied().unwrap_or_default()
    }

    /// Opening balance plus applied deltas.
    #[must_use]
    pub fn balance(&self, account: BalanceAccount) -> Decimal {
        self.opening.get(&account).copied().unwrap_or_default() + self.applied(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settlement::{DocumentKind, Posting, Settlement};
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_can_go_negative() {
        let mut book = BalanceBook::new().with_opening(BalanceAccount::Company, dec!(50));
        let payment = Posting::settled(DocumentKind::Payment, Settlement::cash(dec!(80)).unwrap());

        book.apply(&EffectPlan::post(&payment));
        assert_eq!(book.balance(BalanceAccount::Company), dec!(-30));
        assert_eq!(book.applied(BalanceAccount::Company), dec!(-80));
    }
}
