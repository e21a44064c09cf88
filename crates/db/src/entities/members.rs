//! `SeaORM` Entity for members table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::MemberRole;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub phone_number: String,
    pub emergency_number: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: MemberRole,
    pub address: Option<String>,
    pub image: Option<String>,
    pub status: bool,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub opening_bal: Decimal,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub company_opening_bal: Decimal,
    pub joining_date: Option<Date>,
    #[sea_orm(column_type = "Decimal(Some((15, 2)))")]
    pub salary: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
