//! `SeaORM` Entity for items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::ItemType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub item_code: String,
    pub item_name: String,
    pub item_type: ItemType,
    pub category_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub purchase_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub sale_rate: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub mrp: Decimal,
    pub opening_stock: i32,
    pub min_stock: i32,
    pub tax_id: Option<Uuid>,
    pub as_of_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Categories,
    #[sea_orm(
        belongs_to = "super::taxes::Entity",
        from = "Column::TaxId",
        to = "super::taxes::Column::Id"
    )]
    Taxes,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::taxes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Taxes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
