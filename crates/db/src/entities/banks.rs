//! `SeaORM` Entity for banks table.
//!
//! `opening_bal` is the running balance of the account.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "banks")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub account_name: String,
    pub bank_name: String,
    #[sea_orm(unique)]
    pub account_no: String,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub opening_bal: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bank_entries::Entity")]
    BankEntries,
}

impl Related<super::bank_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BankEntries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
