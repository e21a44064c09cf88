//! Netted balance changes.

use std::collections::BTreeMap;

use khata_shared::types::BankId;
use rust_decimal::Decimal;

use super::posting::Posting;

/// A balance that documents move.
///
/// `Company` orders before every bank, banks order by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BalanceAccount {
    /// Company cash (`company_details.opening_bal`).
    Company,
    /// One bank account (`banks.opening_bal`).
    Bank(BankId),
}

/// Signed change to one balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceEffect {
    /// Balance to move.
    pub account: BalanceAccount,
    /// Amount to add; negative decreases the balance.
    pub delta: Decimal,
}

impl BalanceEffect {
    /// The effect that cancels this one.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            account: self.account,
            delta: -self.delta,
        }
    }
}

/// Balance changes for one document write, at most one per account.
///
/// Effects on the same account are summed and zero sums are dropped, so a
/// plan never asks storage to touch a balance that does not change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectPlan {
    effects: Vec<BalanceEffect>,
}

impl EffectPlan {
    /// Changes for creating a document.
    #[must_use]
    pub fn post(posting: &Posting) -> Self {
        Self::netted(posting.effects())
    }

    /// Changes for deleting a document.
    #[must_use]
    pub fn unpost(posting: &Posting) -> Self {
        Self::netted(posting.effects().into_iter().map(BalanceEffect::reversed))
    }

    /// Changes for replacing `old` with `new`: reverse the old effects, then
    /// apply the new ones.
    #[must_use]
    pub fn repost(old: &Posting, new: &Posting) -> Self {
        Self::netted(
            old.effects()
                .into_iter()
                .map(BalanceEffect::reversed)
                .chain(new.effects()),
        )
    }

    fn netted(effects: impl IntoIterator<Item = BalanceEffect>) -> Self {
        let mut totals: BTreeMap<BalanceAccount, Decimal> = BTreeMap::new();
        for effect in effects {
            *totals.entry(effect.account).or_default() += effect.delta;
        }
        Self {
            effects: totals
                .into_iter()
                .filter(|(_, delta)| !delta.is_zero())
                .map(|(account, delta)| BalanceEffect { account, delta })
                .collect(),
        }
    }

    /// Effects in application order.
    #[must_use]
    pub fn effects(&self) -> &[BalanceEffect] {
        &self.effects
    }

    /// True when no balance changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Net change this plan makes to `account`.
    #[must_use]
    pub fn delta_for(&self, account: BalanceAccount) -> Decimal {
        self.effects
            .iter()
            .find(|e| e.account == account)
            .map_or(Decimal::ZERO, |e| e.delta)
    }
}
