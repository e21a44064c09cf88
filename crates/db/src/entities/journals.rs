//! `SeaORM` Entity for journals table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::JournalType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journals")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date: Date,
    pub group_id: Uuid,
    pub journal_type: JournalType,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_particulars::Entity")]
    Particulars,
    #[sea_orm(
        belongs_to = "super::ledger_groups::Entity",
        from = "Column::GroupId",
        to = "super::ledger_groups::Column::Id"
    )]
    LedgerGroups,
}

impl Related<super::journal_particulars::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Particulars.def()
    }
}

impl Related<super::ledger_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
