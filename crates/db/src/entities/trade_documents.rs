//! `SeaORM` Entity for trade_documents table.
//!
//! Sales, purchases and both kinds of returns share this table; `kind`
//! tells them apart and invoice numbers are unique per kind.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{PaymentType, TradeKind};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "trade_documents")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: TradeKind,
    pub invoice_no: String,
    pub date: Date,
    pub party_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub discount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub tax_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub total_amount: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub grand_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub received: Decimal,
    pub payment_type: PaymentType,
    pub bank_id: Option<Uuid>,
    pub trxn_id: Option<String>,
    pub notes: Option<String>,
    pub approved_by: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::trade_document_lines::Entity")]
    Lines,
    #[sea_orm(
        belongs_to = "super::parties::Entity",
        from = "Column::PartyId",
        to = "super::parties::Column::Id"
    )]
    Parties,
    #[sea_orm(
        belongs_to = "super::banks::Entity",
        from = "Column::BankId",
        to = "super::banks::Column::Id"
    )]
    Banks,
}

impl Related<super::trade_document_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl Related<super::parties::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parties.def()
    }
}

impl Related<super::banks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Banks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
