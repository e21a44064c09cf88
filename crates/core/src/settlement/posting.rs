//! Documents as seen by the balance engine.

use khata_shared::types::BankId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::SettlementError;
use super::plan::{BalanceAccount, BalanceEffect};

/// How a document was settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Company cash in hand.
    Cash,
    /// A specific bank account.
    Bank,
}

/// Whether settling a document brings money in or sends it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Balance increases.
    Inflow,
    /// Balance decreases.
    Outflow,
}

impl Direction {
    /// Signed delta for a non-negative amount.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            Self::Inflow => amount,
            Self::Outflow => -amount,
        }
    }
}

/// Documents that settle against a single balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Goods sold; the amount received comes in.
    Sale,
    /// Goods bought; the amount paid goes out.
    Purchase,
    /// Goods returned by a customer; the refund goes out.
    SaleReturn,
    /// Goods returned to a supplier; the refund comes in.
    PurchaseReturn,
    /// Money received from a party.
    Receipt,
    /// Money paid to a party, vehicle, staff member or ledger group.
    Payment,
}

impl DocumentKind {
    /// Direction of the money movement when the document is posted.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Sale | Self::PurchaseReturn | Self::Receipt => Direction::Inflow,
            Self::Purchase | Self::SaleReturn | Self::Payment => Direction::Outflow,
        }
    }

    /// Human readable name used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sale => "Sale",
            Self::Purchase => "Purchase",
            Self::SaleReturn => "Sale return",
            Self::PurchaseReturn => "Purchase return",
            Self::Receipt => "Receipt",
            Self::Payment => "Payment",
        }
    }
}

/// Direction of a bank entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferDirection {
    /// Cash paid into the bank.
    Deposit,
    /// Cash drawn from the bank.
    Withdraw,
}

/// Amount and the balance it settles against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    mode: PaymentMode,
    bank_id: Option<BankId>,
    amount: Decimal,
}

impl Settlement {
    /// Describes a settlement.
    ///
    /// Cash settlements drop any bank id the caller passed.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::MissingBank` for bank mode without a bank and
    /// `SettlementError::NegativeAmount` for amounts below zero.
    pub fn new(
        mode: PaymentMode,
        bank_id: Option<BankId>,
        amount: Decimal,
    ) -> Result<Self, SettlementError> {
        if amount < Decimal::ZERO {
            return Err(SettlementError::NegativeAmount);
        }
        let bank_id = match mode {
            PaymentMode::Cash => None,
            PaymentMode::Bank => Some(bank_id.ok_or(SettlementError::MissingBank)?),
        };
        Ok(Self {
            mode,
            bank_id,
            amount,
        })
    }

    /// Cash settlement.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::NegativeAmount` for amounts below zero.
    pub fn cash(amount: Decimal) -> Result<Self, SettlementError> {
        Self::new(PaymentMode::Cash, None, amount)
    }

    /// Settlement mode.
    #[must_use]
    pub const fn mode(&self) -> PaymentMode {
        self.mode
    }

    /// Bank account, present only in bank mode.
    #[must_use]
    pub const fn bank_id(&self) -> Option<BankId> {
        self.bank_id
    }

    /// Settled amount, never negative.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The balance this settlement moves.
    #[must_use]
    pub const fn account(&self) -> BalanceAccount {
        match self.bank_id {
            Some(bank_id) => BalanceAccount::Bank(bank_id),
            None => BalanceAccount::Company,
        }
    }
}

/// A document's footprint on balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Posting {
    /// A document settled against one balance.
    Settled {
        /// Document type; decides the direction.
        kind: DocumentKind,
        /// Where the money went and how much.
        settlement: Settlement,
    },
    /// Cash moved between the company and a bank.
    BankTransfer {
        /// Bank on the other side of the company cash balance.
        bank_id: BankId,
        /// Deposit or withdrawal.
        direction: TransferDirection,
        /// Moved amount, never negative.
        amount: Decimal,
    },
}

impl Posting {
    /// Posting for a settled document.
    #[must_use]
    pub const fn settled(kind: DocumentKind, settlement: Settlement) -> Self {
        Self::Settled { kind, settlement }
    }

    /// Posting for a bank entry.
    ///
    /// # Errors
    ///
    /// Returns `SettlementError::NegativeAmount` for amounts below zero.
    pub fn bank_transfer(
        bank_id: BankId,
        direction: TransferDirection,
        amount: Decimal,
    ) -> Result<Self, SettlementError> {
        if amount < Decimal::ZERO {
            return Err(SettlementError::NegativeAmount);
        }
        Ok(Self::BankTransfer {
            bank_id,
            direction,
            amount,
        })
    }

    /// Raw effects of posting, one per touched balance.
    #[must_use]
    pub fn effects(&self) -> Vec<BalanceEffect> {
        match *self {
            Self::Settled { kind, settlement } => vec![BalanceEffect {
                account: settlement.account(),
                delta: kind.direction().signed(settlement.amount()),
            }],
            Self::BankTransfer {
                bank_id,
                direction,
                amount,
            } => {
                let into_bank = match direction {
                    TransferDirection::Deposit => amount,
                    TransferDirection::Withdraw => -amount,
                };
                vec![
                    BalanceEffect {
                        account: BalanceAccount::Company,
                        delta: -into_bank,
                    },
                    BalanceEffect {
                        account: BalanceAccount::Bank(bank_id),
                        delta: into_bank,
                    },
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(DocumentKind::Sale, dec!(100))]
    #[case(DocumentKind::PurchaseReturn, dec!(100))]
    #[case(DocumentKind::Receipt, dec!(100))]
    #[case(DocumentKind::Purchase, dec!(-100))]
    #[case(DocumentKind::SaleReturn, dec!(-100))]
    #[case(DocumentKind::Payment, dec!(-100))]
    fn test_cash_effect_sign(#[case] kind: DocumentKind, #[case] delta: Decimal) {
        let posting = Posting::settled(kind, Settlement::cash(dec!(100)).unwrap());
        assert_eq!(
            posting.effects(),
            vec![BalanceEffect {
                account: BalanceAccount::Company,
                delta,
            }]
        );
    }

    #[test]
    fn test_bank_settlement_targets_bank() {
        let bank = BankId::new();
        let settlement = Settlement::new(PaymentMode::Bank, Some(bank), dec!(40.50)).unwrap();
        let effects = Posting::settled(DocumentKind::Purchase, settlement).effects();

        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].account, BalanceAccount::Bank(bank));
        assert_eq!(effects[0].delta, dec!(-40.50));
    }

    #[test]
    fn test_bank_mode_requires_bank() {
        assert_eq!(
            Settlement::new(PaymentMode::Bank, None, dec!(1)),
            Err(SettlementError::MissingBank)
        );
    }

    #[test]
    fn test_cash_mode_drops_bank() {
        let settlement = Settlement::new(PaymentMode::Cash, Some(BankId::new()), dec!(1)).unwrap();
        assert_eq!(settlement.bank_id(), None);
        assert_eq!(settlement.account(), BalanceAccount::Company);
    }

    #[test]
    fn test_negative_amounts_rejected() {
        assert_eq!(Settlement::cash(dec!(-0.01)), Err(SettlementError::NegativeAmount));
        assert_eq!(
            Posting::bank_transfer(BankId::new(), TransferDirection::Deposit, dec!(-5)),
            Err(SettlementError::NegativeAmount)
        );
        assert!(Settlement::cash(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_deposit_moves_cash_into_bank() {
        let bank = BankId::new();
        let effects = Posting::bank_transfer(bank, TransferDirection::Deposit, dec!(500))
            .unwrap()
            .effects();

        assert_eq!(
            effects,
            vec![
                BalanceEffect {
                    account: BalanceAccount::Company,
                    delta: dec!(-500),
                },
                BalanceEffect {
                    account: BalanceAccount::Bank(bank),
                    delta: dec!(500),
                },
            ]
        );
    }

    #[test]
    fn test_withdrawal_moves_cash_out_of_bank() {
        let bank = BankId::new();
        let effects = Posting::bank_transfer(bank, TransferDirection::Withdraw, dec!(75))
            .unwrap()
            .effects();

        assert_eq!(effects[0].delta, dec!(75));
        assert_eq!(effects[1].delta, dec!(-75));
    }
}
