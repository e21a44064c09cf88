//! Trade documents, cash documents, journals and stock movements.

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

fn referenced(
    name: &str,
    from: (impl IntoIden + 'static, impl IntoIden + 'static),
    to: (impl IntoIden + 'static, impl IntoIden + 'static),
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(from.0, from.1)
        .to(to.0, to.1)
        .on_delete(ForeignKeyAction::NoAction)
        .to_owned()
}

fn cascade(
    name: &str,
    from: (impl IntoIden + 'static, impl IntoIden + 'static),
    to: (impl IntoIden + 'static, impl IntoIden + 'static),
) -> ForeignKeyCreateStatement {
    ForeignKey::create()
        .name(name)
        .from(from.0, from.1)
        .to(to.0, to.1)
        .on_delete(ForeignKeyAction::Cascade)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    #[allow(clippy::too_many_lines)]
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TradeDocuments::Table)
                    .col(id_column(TradeDocuments::Id))
                    .col(enum_column(TradeDocuments::Kind))
                    .col(ColumnDef::new(TradeDocuments::InvoiceNo).string().not_null())
                    .col(ColumnDef::new(TradeDocuments::Date).date().not_null())
                    .col(ColumnDef::new(TradeDocuments::PartyId).uuid().not_null())
                    .col(money_column(TradeDocuments::Discount))
                    .col(money_column(TradeDocuments::TaxAmount))
                    .col(money_column(TradeDocuments::TotalAmount))
                    .col(money_column(TradeDocuments::GrandTotal))
                    .col(money_column(TradeDocuments::Received))
                    .col(enum_column(TradeDocuments::PaymentType))
                    .col(ColumnDef::new(TradeDocuments::BankId).uuid())
                    .col(ColumnDef::new(TradeDocuments::TrxnId).string())
                    .col(ColumnDef::new(TradeDocuments::Notes).text())
                    .col(ColumnDef::new(TradeDocuments::ApprovedBy).string())
                    .col(timestamp_column(TradeDocuments::CreatedAt))
                    .col(timestamp_column(TradeDocuments::UpdatedAt))
                    .foreign_key(&mut referenced(
                        "fk_trade_documents_party",
                        (TradeDocuments::Table, TradeDocuments::PartyId),
                        (Parties::Table, Parties::Id),
                    ))
                    .foreign_key(&mut referenced(
                        "fk_trade_documents_bank",
                        (TradeDocuments::Table, TradeDocuments::BankId),
                        (Banks::Table, Banks::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_trade_documents_kind_invoice")
                    .table(TradeDocuments::Table)
                    .col(TradeDocuments::Kind)
                    .col(TradeDocuments::InvoiceNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TradeDocumentLines::Table)
                    .col(id_column(TradeDocumentLines::Id))
                    .col(ColumnDef::new(TradeDocumentLines::DocumentId).uuid().not_null())
                    .col(ColumnDef::new(TradeDocumentLines::ItemId).uuid().not_null())
                    .col(ColumnDef::new(TradeDocumentLines::Quantity).integer().not_null())
                    .col(money_column(TradeDocumentLines::Rate))
                    .col(money_column(TradeDocumentLines::Tax))
                    .col(money_column(TradeDocumentLines::Mrp))
                    .col(money_column(TradeDocumentLines::TotalAmount))
                    .foreign_key(&mut cascade(
                        "fk_trade_document_lines_document",
                        (TradeDocumentLines::Table, TradeDocumentLines::DocumentId),
                        (TradeDocuments::Table, TradeDocuments::Id),
                    ))
                    .foreign_key(&mut referenced(
                        "fk_trade_document_lines_item",
                        (TradeDocumentLines::Table, TradeDocumentLines::ItemId),
                        (Items::Table, Items::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Receipts::Table)
                    .col(id_column(Receipts::Id))
                    .col(ColumnDef::new(Receipts::ReceiptNo).string().not_null().unique_key())
                    .col(ColumnDef::new(Receipts::Date).date().not_null())
                    .col(ColumnDef::new(Receipts::PartyId).uuid().not_null())
                    .col(money_column(Receipts::Amount))
                    .col(enum_column(Receipts::PaymentType))
                    .col(ColumnDef::new(Receipts::BankId).uuid())
                    .col(ColumnDef::new(Receipts::TrxnId).string())
                    .col(ColumnDef::new(Receipts::Notes).text())
                    .col(timestamp_column(Receipts::CreatedAt))
                    .col(timestamp_column(Receipts::UpdatedAt))
                    .foreign_key(&mut referenced(
                        "fk_receipts_party",
                        (Receipts::Table, Receipts::PartyId),
                        (Parties::Table, Parties::Id),
                    ))
                    .foreign_key(&mut referenced(
                        "fk_receipts_bank",
                        (Receipts::Table, Receipts::BankId),
                        (Banks::Table, Banks::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .col(id_column(Payments::Id))
                    .col(ColumnDef::new(Payments::PaymentNo).string().not_null().unique_key())
                    .col(ColumnDef::new(Payments::Date).date().not_null())
                    .col(enum_column(Payments::PayeeType))
                    .col(ColumnDef::new(Payments::PayeeId).uuid().not_null())
                    .col(money_column(Payments::Amount))
                    .col(enum_column(Payments::PaymentType))
                    .col(ColumnDef::new(Payments::BankId).uuid())
                    .col(ColumnDef::new(Payments::TrxnId).string())
                    .col(ColumnDef::new(Payments::Notes).text())
                    .col(timestamp_column(Payments::CreatedAt))
                    .col(timestamp_column(Payments::UpdatedAt))
                    .foreign_key(&mut referenced(
                        "fk_payments_bank",
                        (Payments::Table, Payments::BankId),
                        (Banks::Table, Banks::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BankEntries::Table)
                    .col(id_column(BankEntries::Id))
                    .col(ColumnDef::new(BankEntries::TrxnNumber).string().not_null().unique_key())
                    .col(ColumnDef::new(BankEntries::Date).date().not_null())
                    .col(ColumnDef::new(BankEntries::BankId).uuid().not_null())
                    .col(money_column(BankEntries::Amount))
                    .col(enum_column(BankEntries::AmountType))
                    .col(ColumnDef::new(BankEntries::TrxnId).string().not_null())
                    .col(ColumnDef::new(BankEntries::Notes).text())
                    .col(timestamp_column(BankEntries::CreatedAt))
                    .col(timestamp_column(BankEntries::UpdatedAt))
                    .foreign_key(&mut referenced(
                        "fk_bank_entries_bank",
                        (BankEntries::Table, BankEntries::BankId),
                        (Banks::Table, Banks::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Journals::Table)
                    .col(id_column(Journals::Id))
                    .col(ColumnDef::new(Journals::Date).date().not_null())
                    .col(ColumnDef::new(Journals::GroupId).uuid().not_null())
                    .col(enum_column(Journals::JournalType))
                    .col(ColumnDef::new(Journals::Notes).text())
                    .col(timestamp_column(Journals::CreatedAt))
                    .col(timestamp_column(Journals::UpdatedAt))
                    .foreign_key(&mut referenced(
                        "fk_journals_group",
                        (Journals::Table, Journals::GroupId),
                        (LedgerGroups::Table, LedgerGroups::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(JournalParticulars::Table)
                    .col(id_column(JournalParticulars::Id))
                    .col(ColumnDef::new(JournalParticulars::JournalId).uuid().not_null())
                    .col(ColumnDef::new(JournalParticulars::Particular).string().not_null())
                    .col(money_column(JournalParticulars::Amount))
                    .foreign_key(&mut cascade(
                        "fk_journal_particulars_journal",
                        (JournalParticulars::Table, JournalParticulars::JournalId),
                        (Journals::Table, Journals::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehicleStocks::Table)
                    .col(id_column(VehicleStocks::Id))
                    .col(ColumnDef::new(VehicleStocks::StockNo).string().not_null().unique_key())
                    .col(ColumnDef::new(VehicleStocks::VehicleId).uuid().not_null())
                    .col(ColumnDef::new(VehicleStocks::Date).date().not_null())
                    .col(enum_column(VehicleStocks::StockType))
                    .col(timestamp_column(VehicleStocks::CreatedAt))
                    .col(timestamp_column(VehicleStocks::UpdatedAt))
                    .foreign_key(&mut referenced(
                        "fk_vehicle_stocks_vehicle",
                        (VehicleStocks::Table, VehicleStocks::VehicleId),
                        (Vehicles::Table, Vehicles::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VehicleStockLines::Table)
                    .col(id_column(VehicleStockLines::Id))
                    .col(ColumnDef::new(VehicleStockLines::VehicleStockId).uuid().not_null())
                    .col(ColumnDef::new(VehicleStockLines::ItemId).uuid().not_null())
                    .col(ColumnDef::new(VehicleStockLines::Quantity).integer().not_null())
                    .foreign_key(&mut cascade(
                        "fk_vehicle_stock_lines_stock",
                        (VehicleStockLines::Table, VehicleStockLines::VehicleStockId),
                        (VehicleStocks::Table, VehicleStocks::Id),
                    ))
                    .foreign_key(&mut referenced(
                        "fk_vehicle_stock_lines_item",
                        (VehicleStockLines::Table, VehicleStockLines::ItemId),
                        (Items::Table, Items::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DamageStocks::Table)
                    .col(id_column(DamageStocks::Id))
                    .col(ColumnDef::new(DamageStocks::DamageId).string().not_null().unique_key())
                    .col(ColumnDef::new(DamageStocks::Date).date().not_null())
                    .col(ColumnDef::new(DamageStocks::ItemId).uuid().not_null())
                    .col(ColumnDef::new(DamageStocks::Quantity).integer().not_null())
                    .col(ColumnDef::new(DamageStocks::Notes).text())
                    .col(timestamp_column(DamageStocks::CreatedAt))
                    .col(timestamp_column(DamageStocks::UpdatedAt))
                    .foreign_key(&mut referenced(
                        "fk_damage_stocks_item",
                        (DamageStocks::Table, DamageStocks::ItemId),
                        (Items::Table, Items::Id),
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            DamageStocks::Table.into_iden(),
            VehicleStockLines::Table.into_iden(),
            VehicleStocks::Table.into_iden(),
            JournalParticulars::Table.into_iden(),
            Journals::Table.into_iden(),
            BankEntries::Table.into_iden(),
            Payments::Table.into_iden(),
            Receipts::Table.into_iden(),
            TradeDocumentLines::Table.into_iden(),
            TradeDocuments::Table.into_iden(),
        ] {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden)]
enum TradeDocuments {
    Table,
    Id,
    Kind,
    InvoiceNo,
    Date,
    PartyId,
    Discount,
    TaxAmount,
    TotalAmount,
    GrandTotal,
    Received,
    PaymentType,
    BankId,
    TrxnId,
    Notes,
    ApprovedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TradeDocumentLines {
    Table,
    Id,
    DocumentId,
    ItemId,
    Quantity,
    Rate,
    Tax,
    Mrp,
    TotalAmount,
}

#[derive(DeriveIden)]
enum Receipts {
    Table,
    Id,
    ReceiptNo,
    Date,
    PartyId,
    Amount,
    PaymentType,
    BankId,
    TrxnId,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    PaymentNo,
    Date,
    PayeeType,
    PayeeId,
    Amount,
    PaymentType,
    BankId,
    TrxnId,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BankEntries {
    Table,
    Id,
    TrxnNumber,
    Date,
    BankId,
    Amount,
    AmountType,
    TrxnId,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Journals {
    Table,
    Id,
    Date,
    GroupId,
    JournalType,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum JournalParticulars {
    Table,
    Id,
    JournalId,
    Particular,
    Amount,
}

#[derive(DeriveIden)]
enum VehicleStocks {
    Table,
    Id,
    StockNo,
    VehicleId,
    Date,
    StockType,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum VehicleStockLines {
    Table,
    Id,
    VehicleStockId,
    ItemId,
    Quantity,
}

#[derive(DeriveIden)]
enum DamageStocks {
    Table,
    Id,
    DamageId,
    Date,
    ItemId,
    Quantity,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Parties {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Banks {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Items {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum LedgerGroups {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Vehicles {
    Table,
    Id,
}
