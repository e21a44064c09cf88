//! Property-based tests for effect plans.
//!
//! - A balance equals its opening value plus the sum of applied effects
//! - Unposting cancels posting exactly
//! - Reposting lands on the same balances as posting the new version alone

use khata_shared::types::BankId;
use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::book::BalanceBook;
use super::plan::{BalanceAccount, EffectPlan};
use super::posting::{DocumentKind, PaymentMode, Posting, Settlement, TransferDirection};

/// Three fixed banks so postings collide on accounts often.
fn bank_id() -> impl Strategy<Value = BankId> {
    (1u128..=3).prop_map(|n| BankId::from_uuid(Uuid::from_u128(n)))
}

/// 0.00 to 1,000,000.00.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn kind() -> impl Strategy<Value = DocumentKind> {
    prop_oneof![
        Just(DocumentKind::Sale),
        Just(DocumentKind::Purchase),
        Just(DocumentKind::SaleReturn),
        Just(DocumentKind::PurchaseReturn),
        Just(DocumentKind::Receipt),
        Just(DocumentKind::Payment),
    ]
}

fn settlement() -> impl Strategy<Value = Settlement> {
    (any::<bool>(), bank_id(), amount()).prop_map(|(use_bank, bank, amount)| {
        let mode = if use_bank {
            PaymentMode::Bank
        } else {
            PaymentMode::Cash
        };
        Settlement::new(mode, Some(bank), amount).unwrap()
    })
}

fn posting() -> impl Strategy<Value = Posting> {
    prop_oneof![
        (kind(), settlement()).prop_map(|(kind, s)| Posting::settled(kind, s)),
        (bank_id(), any::<bool>(), amount()).prop_map(|(bank, deposit, amount)| {
            let direction = if deposit {
                TransferDirection::Deposit
            } else {
                TransferDirection::Withdraw
            };
            Posting::bank_transfer(bank, direction, amount).unwrap()
        }),
    ]
}

fn accounts() -> Vec<BalanceAccount> {
    let mut accounts = vec![BalanceAccount::Company];
    accounts.extend((1u128..=3).map(|n| BalanceAccount::Bank(BankId::from_uuid(Uuid::from_u128(n)))));
    accounts
}

fn raw_sum(postings: &[Posting], account: BalanceAccount) -> Decimal {
    postings
        .iter()
        .flat_map(Posting::effects)
        .filter(|e| e.account == account)
        .map(|e| e.delta)
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* sequence of postings, each balance SHALL equal its opening
    /// value plus the sum of the raw effects of those postings.
    #[test]
    fn prop_balance_is_opening_plus_effects(
        opening in amount(),
        postings in prop::collection::vec(posting(), 0..20),
    ) {
        let mut book = BalanceBook::new().with_opening(BalanceAccount::Company, opening);
        for posting in &postings {
            book.apply(&EffectPlan::post(posting));
        }

        for account in accounts() {
            let expected_opening = if account == BalanceAccount::Company { opening } else { Decimal::ZERO };
            prop_assert_eq!(book.balance(account), expected_opening + raw_sum(&postings, account));
        }
    }

    /// *For any* posting, unposting it SHALL restore every balance.
    #[test]
    fn prop_unpost_cancels_post(posting in posting(), opening in amount()) {
        let mut book = BalanceBook::new().with_opening(BalanceAccount::Company, opening);
        book.apply(&EffectPlan::post(&posting));
        book.apply(&EffectPlan::unpost(&posting));

        for account in accounts() {
            prop_assert_eq!(book.applied(account), Decimal::ZERO);
        }
    }

    /// *For any* old and new version of a document, posting the old one and
    /// then reposting SHALL equal posting only the new one.
    #[test]
    fn prop_repost_equals_fresh_post(old in posting(), new in posting()) {
        let mut updated = BalanceBook::new();
        updated.apply(&EffectPlan::post(&old));
        updated.apply(&EffectPlan::repost(&old, &new));

        let mut fresh = BalanceBook::new();
        fresh.apply(&EffectPlan::post(&new));

        for account in accounts() {
            prop_assert_eq!(updated.balance(account), fresh.balance(account));
        }
    }

    /// *For any* plan, no account SHALL appear twice and no delta SHALL be zero.
    #[test]
    fn prop_plans_are_netted(old in posting(), new in posting()) {
        let plan = EffectPlan::repost(&old, &new);
        let effects = plan.effects();

        prop_assert!(effects.iter().all(|e| !e.delta.is_zero()));
        prop_assert!(effects.windows(2).all(|w| w[0].account < w[1].account));
    }

    /// *For any* bank transfer, the company and bank legs SHALL cancel out.
    #[test]
    fn prop_transfer_conserves_money(bank in bank_id(), deposit in any::<bool>(), amount in amount()) {
        let direction = if deposit { TransferDirection::Deposit } else { TransferDirection::Withdraw };
        let plan = EffectPlan::post(&Posting::bank_transfer(bank, direction, amount).unwrap());

        let total: Decimal = plan.effects().iter().map(|e| e.delta).sum();
        prop_assert_eq!(total, Decimal::ZERO);
    }
}
