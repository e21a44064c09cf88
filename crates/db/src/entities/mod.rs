//! `SeaORM` entity definitions.
//!
//! One module per table. Money columns are `DECIMAL(15, 2)`; enum columns
//! are stored as short strings (see [`sea_orm_active_enums`]).

#![allow(missing_docs)]

pub mod prelude;

pub mod bank_entries;
pub mod banks;
pub mod categories;
pub mod company_details;
pub mod damage_stocks;
pub mod items;
pub mod journal_particulars;
pub mod journals;
pub mod ledger_groups;
pub mod members;
pub mod parties;
pub mod payments;
pub mod receipts;
pub mod routes;
pub mod sea_orm_active_enums;
pub mod taxes;
pub mod trade_document_lines;
pub mod trade_documents;
pub mod vehicle_stock_lines;
pub mod vehicle_stocks;
pub mod vehicles;
