//! `SeaORM` Entity for vehicles table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicles")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub vehicle_no: String,
    pub vehicle_name: String,
    pub status: bool,
    pub as_of_date: Option<Date>,
    pub assigned_route_id: Option<Uuid>,
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
