//! String-backed enums stored in the database.

use khata_core::auth::MemberRole as CoreMemberRole;
use khata_core::settlement::{DocumentKind, PaymentMode, TransferDirection};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "salesman")]
    Salesman,
    #[sea_orm(string_value = "accountant")]
    Accountant,
}

impl From<MemberRole> for CoreMemberRole {
    fn from(role: MemberRole) -> Self {
        match role {
            MemberRole::Admin => Self::Admin,
            MemberRole::Manager => Self::Manager,
            MemberRole::Salesman => Self::Salesman,
            MemberRole::Accountant => Self::Accountant,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum GroupType {
    #[sea_orm(string_value = "group")]
    Group,
    #[sea_orm(string_value = "ledger")]
    Ledger,
    #[sea_orm(string_value = "both")]
    Both,
}

impl GroupType {
    /// Whether other groups may be nested under this one.
    #[must_use]
    pub const fn can_contain_groups(self) -> bool {
        matches!(self, Self::Group | Self::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum PartyType {
    #[sea_orm(string_value = "sale")]
    Sale,
    #[sea_orm(string_value = "purchase")]
    Purchase,
    #[sea_orm(string_value = "sale_and_purchase")]
    SaleAndPurchase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum BalanceType {
    #[sea_orm(string_value = "pay")]
    Pay,
    #[sea_orm(string_value = "receive")]
    Receive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    #[sea_orm(string_value = "product")]
    Product,
    #[sea_orm(string_value = "service")]
    Service,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    #[sea_orm(string_value = "sale")]
    Sale,
    #[sea_orm(string_value = "purchase")]
    Purchase,
    #[sea_orm(string_value = "sale_return")]
    SaleReturn,
    #[sea_orm(string_value = "purchase_return")]
    PurchaseReturn,
}

impl From<TradeKind> for DocumentKind {
    fn from(kind: TradeKind) -> Self {
        match kind {
            TradeKind::Sale => Self::Sale,
            TradeKind::Purchase => Self::Purchase,
            TradeKind::SaleReturn => Self::SaleReturn,
            TradeKind::PurchaseReturn => Self::PurchaseReturn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "bank")]
    Bank,
}

impl From<PaymentType> for PaymentMode {
    fn from(payment_type: PaymentType) -> Self {
        match payment_type {
            PaymentType::Cash => Self::Cash,
            PaymentType::Bank => Self::Bank,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum PayeeType {
    #[sea_orm(string_value = "party")]
    Party,
    #[sea_orm(string_value = "vehicle")]
    Vehicle,
    #[sea_orm(string_value = "staff")]
    Staff,
    #[sea_orm(string_value = "group")]
    Group,
}

impl PayeeType {
    /// Name used in "not found" messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Party => "Party",
            Self::Vehicle => "Vehicle",
            Self::Staff => "Staff",
            Self::Group => "Group",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum AmountType {
    #[sea_orm(string_value = "deposit")]
    Deposit,
    #[sea_orm(string_value = "withdraw")]
    Withdraw,
}

impl From<AmountType> for TransferDirection {
    fn from(amount_type: AmountType) -> Self {
        match amount_type {
            AmountType::Deposit => Self::Deposit,
            AmountType::Withdraw => Self::Withdraw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum JournalType {
    #[sea_orm(string_value = "debit")]
    Debit,
    #[sea_orm(string_value = "credit")]
    Credit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum StockType {
    #[sea_orm(string_value = "stock_in")]
    StockIn,
    #[sea_orm(string_value = "stock_out")]
    StockOut,
}
