//! `SeaORM` Entity for parties table (customers and suppliers).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{BalanceType, PartyType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "parties")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub party_name: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub assigned_route_id: Option<Uuid>,
    pub address: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 7)))")]
    pub latitude: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 7)))")]
    pub longitude: Option<Decimal>,
    pub party_type: PartyType,
    pub route_priority: Option<i32>,
    pub as_of_date: Option<Date>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub opening_bal: Decimal,
    pub balance_type: BalanceType,
    pub status: bool,
    pub group_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::routes::Entity",
        from = "Column::AssignedRouteId",
        to = "super::routes::Column::Id"
    )]
    Routes,
    #[sea_orm(
        belongs_to = "super::ledger_groups::Entity",
        from = "Column::GroupId",
        to = "super::ledger_groups::Column::Id"
    )]
    LedgerGroups,
}

impl Related<super::routes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Routes.def()
    }
}

impl Related<super::ledger_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerGroups.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
