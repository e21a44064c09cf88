//! Members, company record and master data.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn id_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().primary_key().to_owned()
}

fn money_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .decimal_len(15, 2)
        .not_null()
        .default(0)
        .to_owned()
}

fn enum_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).string_len(32).not_null().to_owned()
}

fn timestamp_column<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .col(id_column(Members::Id))
                    .col(ColumnDef::new(Members::Username).string().not_null().unique_key())
                    .col(ColumnDef::new(Members::Name).string().not_null())
                    .col(ColumnDef::new(Members::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Members::PhoneNumber).string().not_null().unique_key())
                    .col(ColumnDef::new(Members::EmergencyNumber).string())
                    .col(ColumnDef::new(Members::PasswordHash).string().not_null())
                    .col(enum_column(Members::Role))
                    .col(ColumnDef::new(Members::Address).string())
                    .col(ColumnDef::new(Members::Image).string())
                    .col(ColumnDef::new(Members::Status).boolean().not_null().default(true))
                    .col(money_column(Members::OpeningBal))
                    .col(money_column(Members::CompanyOpeningBal))
                    .col(ColumnDef::new(Members::JoiningDate).date())
                    .col(money_column(Members::Salary))
                    .col(timestamp_column(Members::CreatedAt))
                    .col(timestamp_column(Members::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompanyDetails::Table)
                    .col(id_column(CompanyDetails::Id))
                    .col(ColumnDef::new(CompanyDetails::CompanyName).string().not_null())
                    .col(ColumnDef::new(CompanyDetails::Email).string())
                    .col(ColumnDef::new(CompanyDetails::PhoneNumber).string())
                    .col(ColumnDef::new(CompanyDetails::Address).string())
                    .col(ColumnDef::new(CompanyDetails::GstNo).string())
                    .col(money_column(CompanyDetails::OpeningBal))
                    .col(timestamp_column(CompanyDetails::CreatedAt))
                    .col(timestamp_column(CompanyDetails::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LedgerGroups::Table)
                    .col(id_column(LedgerGroups::Id))
                    .col(ColumnDef::new(LedgerGroups::GroupName).string().not_null().unique_key())
                    .col(enum_column(LedgerGroups::GroupType))
                    .col(ColumnDef::new(LedgerGroups::ParentId).uuid())
                    .col(timestamp_column(LedgerGroups::CreatedAt))
                    .col(timestamp_column(LedgerGroups::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ledger_groups_parent")
                            .from(LedgerGroups::Table, LedgerGroups::ParentId)
                            .to(LedgerGroups::Table, LedgerGroups::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Routes::Table)
                    .col(id_column(Routes::Id))
                    .col(ColumnDef::new(Routes::RouteName).string().not_null())
                    .col(ColumnDef::new(Routes::Location).string())
                    .col(ColumnDef::new(Routes::AsOfDate).date())
                    .col(timestamp_column(Routes::CreatedAt))
                    .col(timestamp_column(Routes::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Vehicles::Table)
                    .col(id_column(Vehicles::Id))
                    .col(ColumnDef::new(Vehicles::VehicleNo).string().not_null().unique_key())
                    .col(ColumnDef::new(Vehicles::VehicleName).string().not_null())
                    .col(ColumnDef::new(Vehicles::Status).boolean().not_null().default(true))
                    .col(ColumnDef::new(Vehicles::AsOfDate).date())
                    .col(ColumnDef::new(Vehicles::AssignedRouteId).uuid())
                    .col(ColumnDef::new(Vehicles::GroupId).uuid())
                    .col(timestamp_column(Vehicles::CreatedAt))
                    .col(timestamp_column(Vehicles::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_route")
                            .from(Vehicles::Table, Vehicles::AssignedRouteId)
                            .to(Routes::Table, Routes::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_vehicles_group")
                            .from(Vehicles::Table, Vehicles::GroupId)
                            .to(LedgerGroups::Table, LedgerGroups::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parties::Table)
                    .col(id_column(Parties::Id))
                    .col(ColumnDef::new(Parties::PartyName).string().not_null())
                    .col(ColumnDef::new(Parties::PhoneNumber).string().not_null().unique_key())
                    .col(ColumnDef::new(Parties::Email).string().unique_key())
                    .col(ColumnDef::new(Parties::AssignedRouteId).uuid())
                    .col(ColumnDef::new(Parties::Address).string())
                    .col(ColumnDef::new(Parties::Latitude).decimal_len(10, 7))
                    .col(ColumnDef::new(Parties::Longitude).decimal_len(10, 7))
                    .col(enum_column(Parties::PartyType))
                    .col(ColumnDef::new(Parties::RoutePriority).integer())
                    .col(ColumnDef::new(Parties::AsOfDate).date())
                    .col(money_column(Parties::OpeningBal))
                    .col(enum_column(Parties::BalanceType))
                    .col(ColumnDef::new(Parties::Status).boolean().not_null().default(true))
                    .col(ColumnDef::new(Parties::GroupId).uuid())
                    .col(timestamp_column(Parties::CreatedAt))
                    .col(timestamp_column(Parties::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parties_route")
                            .from(Parties::Table, Parties::AssignedRouteId)
                            .to(Routes::Table, Routes::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parties_group")
                            .from(Parties::Table, Parties::GroupId)
                            .to(LedgerGroups::Table, LedgerGroups::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Banks::Table)
                    .col(id_column(Banks::Id))
                    .col(ColumnDef::new(Banks::AccountName).string().not_null())
                    .col(ColumnDef::new(Banks::BankName).string().not_null())
                    .col(ColumnDef::new(Banks::AccountNo).string().not_null().unique_key())
                    .col(money_column(Banks::OpeningBal))
                    .col(timestamp_column(Banks::CreatedAt))
                    .col(timestamp_column(Banks::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .col(id_column(Categories::Id))
                    .col(ColumnDef::new(Categories::CategoryName).string().not_null().unique_key())
                    .col(timestamp_column(Categories::CreatedAt))
                    .col(timestamp_column(Categories::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Taxes::Table)
                    .col(id_column(Taxes::Id))
                    .col(ColumnDef::new(Taxes::TaxName).string().not_null().unique_key())
                    .col(ColumnDef::new(Taxes::TaxPercentage).decimal_len(5, 2).not_null())
                    .col(timestamp_column(Taxes::CreatedAt))
                    .col(timestamp_column(Taxes::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .col(id_column(Items::Id))
                    .col(ColumnDef::new(Items::ItemCode).string().not_null().unique_key())
                    .col(ColumnDef::new(Items::ItemName).string().not_null())
                    .col(enum_column(Items::ItemType))
                    .col(ColumnDef::new(Items::CategoryId).uuid().not_null())
                    .col(money_column(Items::PurchaseRate))
                    .col(money_column(Items::SaleRate))
                    .col(money_column(Items::Mrp))
                    .col(ColumnDef::new(Items::OpeningStock).integer().not_null().default(0))
                    .col(ColumnDef::new(Items::MinStock).integer().not_null().default(0))
                    .col(ColumnDef::new(Items::TaxId).uuid())
                    .col(ColumnDef::new(Items::AsOfDate).date())
                    .col(timestamp_column(Items::CreatedAt))
                    .col(timestamp_column(Items::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_category")
                            .from(Items::Table, Items::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_tax")
                            .from(Items::Table, Items::TaxId)
                            .to(Taxes::Table, Taxes::Id)
                            .on_delete(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            Items::Table.into_iden(),
            Taxes::Table.into_iden(),
            Categories::Table.into_iden(),
            Banks::Table.into_iden(),
            Parties::Table.into_iden(),
            Vehicles::Table.into_iden(),
            Routes::Table.into_iden(),
            LedgerGroups::Table.into_iden(),
            CompanyDetails::Table.into_iden(),
            Members::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Members {
    Table,
    Id,
    Username,
    Name,
    Email,
    PhoneNumber,
    EmergencyNumber,
    PasswordHash,
    Role,
    Address,
    Image,
    Status,
    OpeningBal,
    CompanyOpeningBal,
    JoiningDate,
    Salary,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CompanyDetails {
    Table,
    Id,
    CompanyName,
    Email,
    PhoneNumber,
    Address,
    GstNo,
    OpeningBal,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LedgerGroups {
    Table,
    Id,
    GroupName,
    GroupType,
    ParentId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Routes {
    Table,
    Id,
    RouteName,
    Location,
    AsOfDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Vehicles {
    Table,
    Id,
    VehicleNo,
    VehicleName,
    Status,
    AsOfDate,
    AssignedRouteId,
    GroupId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Parties {
    Table,
    Id,
    PartyName,
    PhoneNumber,
    Email,
    AssignedRouteId,
    Address,
    Latitude,
    Longitude,
    PartyType,
    RoutePriority,
    AsOfDate,
    OpeningBal,
    BalanceType,
    Status,
    GroupId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Banks {
    Table,
    Id,
    AccountName,
    BankName,
    AccountNo,
    OpeningBal,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    CategoryName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Taxes {
    Table,
    Id,
    TaxName,
    TaxPercentage,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
    ItemCode,
    ItemName,
    ItemType,
    CategoryId,
    PurchaseRate,
    SaleRate,
    Mrp,
    OpeningStock,
    MinStock,
    TaxId,
    AsOfDate,
    CreatedAt,
    UpdatedAt,
}
