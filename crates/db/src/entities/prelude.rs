//! Entity aliases.

pub use super::bank_entries::Entity as BankEntries;
pub use super::banks::Entity as Banks;
pub use super::categories::Entity as Categories;
pub use super::company_details::Entity as CompanyDetails;
pub use super::damage_stocks::Entity as DamageStocks;
pub use super::items::Entity as Items;
pub use super::journal_particulars::Entity as JournalParticulars;
pub use super::journals::Entity as Journals;
pub use super::ledger_groups::Entity as LedgerGroups;
pub use super::members::Entity as Members;
pub use super::parties::Entity as Parties;
pub use super::payments::Entity as Payments;
pub use super::receipts::Entity as Receipts;
pub use super::routes::Entity as Routes;
pub use super::taxes::Entity as Taxes;
pub use super::trade_document_lines::Entity as TradeDocumentLines;
pub use super::trade_documents::Entity as TradeDocuments;
pub use super::vehicle_stock_lines::Entity as VehicleStockLines;
pub use super::vehicle_stocks::Entity as VehicleStocks;
pub use super::vehicles::Entity as Vehicles;
