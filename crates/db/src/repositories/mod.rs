//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Balance-bearing documents write their rows and their balance effects in
//! one database transaction.

pub mod balance;
pub mod bank;
pub mod bank_entry;
pub mod category;
pub mod company;
pub mod damage_stock;
pub mod group;
pub mod item;
pub mod journal;
pub mod member;
pub mod party;
pub mod payment;
pub mod receipt;
pub mod route;
pub mod tax;
pub mod trade;
pub mod vehicle;
pub mod vehicle_stock;

pub use balance::{BalanceRepository, BalanceSummary, BankBalance};
pub use bank::{BankInput, BankRepository, UpdateBankInput};
pub use bank_entry::{BankEntryInput, BankEntryRepository};
pub use category::{CategoryInput, CategoryRepository};
pub use company::{CompanyInput, CompanyRepository, UpdateCompanyInput};
pub use damage_stock::{DamageStockInput, DamageStockRepository};
pub use group::{GroupInput, GroupRepository, UpdateGroupInput};
pub use item::{ItemInput, ItemRepository, UpdateItemInput};
pub use journal::{JournalInput, JournalParticularInput, JournalRepository, JournalWithParticulars};
pub use member::{CreateMemberInput, LoginError, MemberRepository, UpdateMemberInput};
pub use party::{PartyInput, PartyRepository, UpdatePartyInput};
pub use payment::{PaymentInput, PaymentRepository};
pub use receipt::{ReceiptInput, ReceiptRepository};
pub use route::{RouteInput, RouteRepository, UpdateRouteInput};
pub use tax::{TaxInput, TaxRepository, UpdateTaxInput};
pub use trade::{TradeDocumentInput, TradeDocumentWithLines, TradeLineInput, TradeRepository};
pub use vehicle::{UpdateVehicleInput, VehicleInput, VehicleRepository};
pub use vehicle_stock::{
    VehicleStockInput, VehicleStockLineInput, VehicleStockRepository, VehicleStockWithLines,
};

use khata_core::auth::is_phone;
use khata_core::validation::{ValidationError, required_text};
use khata_shared::types::{PageRequest, PageResponse};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, PrimaryKeyTrait, Select};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Loads a row by primary key or reports `label` as missing.
pub(crate) async fn find_required<E, C>(conn: &C, id: Uuid, label: &'static str) -> StoreResult<E::Model>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    C: ConnectionTrait,
{
    E::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(StoreError::NotFound(label))
}

/// Checks that an optional reference points at an existing row.
pub(crate) async fn ensure_exists<E, C>(
    conn: &C,
    id: Option<Uuid>,
    label: &'static str,
) -> StoreResult<()>
where
    E: EntityTrait,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    C: ConnectionTrait,
{
    if let Some(id) = id {
        find_required::<E, C>(conn, id, label).await?;
    }
    Ok(())
}

/// Fails with `Duplicate(label)` when `query` matches any row.
pub(crate) async fn ensure_unique<E, C>(conn: &C, query: Select<E>, label: &str) -> StoreResult<()>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    if query.one(conn).await?.is_some() {
        return Err(StoreError::Duplicate(label.to_string()));
    }
    Ok(())
}

/// Runs `query` one page at a time.
pub(crate) async fn fetch_page<E, C>(
    conn: &C,
    query: Select<E>,
    page: &PageRequest,
) -> StoreResult<PageResponse<E::Model>>
where
    E: EntityTrait,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let paginator = query.paginate(conn, page.per_page());
    let total = paginator.num_items().await?;
    let data = paginator.fetch_page(page.page_index()).await?;
    Ok(PageResponse::new(data, page, total))
}

/// Trims a phone number and checks its shape.
pub(crate) fn checked_phone(value: &str) -> StoreResult<String> {
    let value = required_text("phoneNumber", value)?;
    if !is_phone(&value) {
        return Err(ValidationError::InvalidFormat {
            field: "phoneNumber",
            expected: "10 to 15 digits",
        }
        .into());
    }
    Ok(value)
}
