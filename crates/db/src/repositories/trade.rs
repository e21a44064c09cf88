//! Sales, purchases and their returns.
//!
//! All four kinds share one table and one code path. The amount settled on
//! the document (`received`) moves the company cash balance or the chosen
//! bank balance, in the direction the document kind dictates.

use chrono::{NaiveDate, Utc};
use khata_core::settlement::{DocumentKind, EffectPlan, PaymentMode, Posting, Settlement};
use khata_core::validation::{
    TradeLine, TradeTotals, bank_reference, optional_text, validate_trade_document,
};
use khata_shared::types::{BankId, PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::balance::{apply_plan, ensure_settlement_target, stored_settlement};
use super::{ensure_unique, fetch_page, find_required};
use crate::entities::{
    items, parties,
    sea_orm_active_enums::{PaymentType, TradeKind},
    trade_document_lines, trade_documents,
};
use crate::error::{StoreError, StoreResult};

/// One line of a trade document.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TradeLineInput {
    /// Item moved.
    pub item_id: Uuid,
    /// Units moved.
    pub quantity: i32,
    /// Unit rate.
    #[serde(alias = "saleRate", alias = "purchaseRate")]
    pub rate: Decimal,
    /// Tax on the line.
    #[serde(default)]
    pub tax: Decimal,
    /// Printed retail price.
    #[serde(default)]
    pub mrp: Decimal,
    /// Line total.
    pub total_amount: Decimal,
}

/// Body of a sale, purchase, sale return or purchase return.
///
/// Updates take the full document; the stored lines are replaced.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TradeDocumentInput {
    /// Invoice number, unique per document kind.
    #[validate(length(min = 1))]
    pub invoice_no: String,
    /// Document date.
    pub date: NaiveDate,
    /// Customer or supplier.
    pub party_id: Uuid,
    /// Discount granted.
    #[serde(default)]
    pub discount: Decimal,
    /// Tax across lines.
    #[serde(default)]
    pub tax_amount: Decimal,
    /// Total before tax and discount.
    pub total_amount: Decimal,
    /// Amount due.
    pub grand_total: Decimal,
    /// Amount settled now; zero for a credit document.
    #[serde(default)]
    pub received: Decimal,
    /// Cash or bank.
    pub payment_type: PaymentType,
    /// Bank for bank settlements.
    pub bank_id: Option<Uuid>,
    /// Bank transaction reference for bank settlements.
    pub trxn_id: Option<String>,
    /// Free text.
    pub notes: Option<String>,
    /// Name of whoever approved the document.
    pub approved_by: Option<String>,
    /// Document lines.
    #[serde(
        alias = "saleItems",
        alias = "purchaseItems",
        alias = "saleReturnItems",
        alias = "purchaseReturnItems"
    )]
    pub items: Vec<TradeLineInput>,
}

/// A trade document together with its lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDocumentWithLines {
    /// Header.
    #[serde(flatten)]
    pub document: trade_documents::Model,
    /// Lines in insertion order.
    pub items: Vec<trade_document_lines::Model>,
}

/// Validated document ready to be written.
struct CheckedDocument {
    invoice_no: String,
    trxn_id: Option<String>,
    settlement: Settlement,
}

fn posting_of(kind: TradeKind, settlement: Settlement) -> Posting {
    Posting::settled(DocumentKind::from(kind), settlement)
}

fn stored_posting(document: &trade_documents::Model) -> StoreResult<Posting> {
    let settlement = stored_settlement(
        document.payment_type.into(),
        document.bank_id,
        document.received,
    )?;
    Ok(posting_of(document.kind, settlement))
}

fn check_input(input: &TradeDocumentInput) -> StoreResult<CheckedDocument> {
    let totals = TradeTotals {
        discount: input.discount,
        tax_amount: input.tax_amount,
        total_amount: input.total_amount,
        grand_total: input.grand_total,
        received: input.received,
    };
    let lines: Vec<TradeLine> = input
        .items
        .iter()
        .map(|line| TradeLine {
            quantity: line.quantity,
            rate: line.rate,
            tax: line.tax,
            mrp: line.mrp,
            total_amount: line.total_amount,
        })
        .collect();
    let invoice_no = validate_trade_document(&input.invoice_no, &totals, &lines)?;

    let mode = PaymentMode::from(input.payment_type);
    let settlement = Settlement::new(mode, input.bank_id.map(BankId::from_uuid), input.received)?;
    let trxn_id = bank_reference(mode, input.trxn_id.as_deref())?;

    Ok(CheckedDocument {
        invoice_no,
        trxn_id,
        settlement,
    })
}

fn line_models(document_id: Uuid, lines: &[TradeLineInput]) -> Vec<trade_document_lines::ActiveModel> {
    lines
        .iter()
        .map(|line| trade_document_lines::ActiveModel {
            id: Set(Uuid::new_v4()),
            document_id: Set(document_id),
            item_id: Set(line.item_id),
            quantity: Set(line.quantity),
            rate: Set(line.rate),
            tax: Set(line.tax),
            mrp: Set(line.mrp),
            total_amount: Set(line.total_amount),
        })
        .collect()
}

async fn find_document<C: ConnectionTrait>(
    conn: &C,
    kind: TradeKind,
    id: Uuid,
) -> StoreResult<trade_documents::Model> {
    trade_documents::Entity::find_by_id(id)
        .filter(trade_documents::Column::Kind.eq(kind))
        .one(conn)
        .await?
        .ok_or_else(|| StoreError::NotFound(DocumentKind::from(kind).label()))
}

/// Repository for the four trade document kinds.
#[derive(Debug, Clone)]
pub struct TradeRepository {
    db: DatabaseConnection,
}

impl TradeRepository {
    /// Creates a new trade repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check_references(
        &self,
        kind: TradeKind,
        input: &TradeDocumentInput,
        checked: &CheckedDocument,
        except: Option<Uuid>,
    ) -> StoreResult<()> {
        let mut duplicate = trade_documents::Entity::find()
            .filter(trade_documents::Column::Kind.eq(kind))
            .filter(trade_documents::Column::InvoiceNo.eq(&checked.invoice_no));
        if let Some(id) = except {
            duplicate = duplicate.filter(trade_documents::Column::Id.ne(id));
        }
        ensure_unique(&self.db, duplicate, "Invoice number").await?;

        find_required::<parties::Entity, _>(&self.db, input.party_id, "Party").await?;
        ensure_settlement_target(&self.db, &checked.settlement).await?;
        for line in &input.items {
            find_required::<items::Entity, _>(&self.db, line.item_id, "Item").await?;
        }
        Ok(())
    }

    /// Records a document and applies its settlement.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed document,
    /// `StoreError::NotFound` for a missing party, bank, item or company
    /// record and `StoreError::Duplicate` for a reused invoice number.
    pub async fn create(
        &self,
        kind: TradeKind,
        input: TradeDocumentInput,
    ) -> StoreResult<TradeDocumentWithLines> {
        let checked = check_input(&input)?;
        self.check_references(kind, &input, &checked, None).await?;

        let now = Utc::now().into();
        let txn = self.db.begin().await?;

        let document = trade_documents::ActiveModel {
            id: Set(Uuid::new_v4()),
            kind: Set(kind),
            invoice_no: Set(checked.invoice_no),
            date: Set(input.date),
            party_id: Set(input.party_id),
            discount: Set(input.discount),
            tax_amount: Set(input.tax_amount),
            total_amount: Set(input.total_amount),
            grand_total: Set(input.grand_total),
            received: Set(input.received),
            payment_type: Set(input.payment_type),
            bank_id: Set(checked.settlement.bank_id().map(BankId::into_inner)),
            trxn_id: Set(checked.trxn_id),
            notes: Set(optional_text(input.notes.as_deref())),
            approved_by: Set(optional_text(input.approved_by.as_deref())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        trade_document_lines::Entity::insert_many(line_models(document.id, &input.items))
            .exec(&txn)
            .await?;

        let plan = EffectPlan::post(&posting_of(kind, checked.settlement));
        apply_plan(&txn, &plan).await?;
        txn.commit().await?;

        tracing::info!(
            document_id = %document.id,
            kind = ?kind,
            received = %document.received,
            "trade document created"
        );
        self.get(kind, document.id).await
    }

    /// Lists documents of one kind, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(
        &self,
        kind: TradeKind,
        page: &PageRequest,
    ) -> StoreResult<PageResponse<trade_documents::Model>> {
        let query = trade_documents::Entity::find()
            .filter(trade_documents::Column::Kind.eq(kind))
            .order_by_desc(trade_documents::Column::Date)
            .order_by_desc(trade_documents::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Loads a document with its lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no document of this kind has the ID.
    pub async fn get(&self, kind: TradeKind, id: Uuid) -> StoreResult<TradeDocumentWithLines> {
        let document = find_document(&self.db, kind, id).await?;
        let items = document
            .find_related(trade_document_lines::Entity)
            .all(&self.db)
            .await?;
        Ok(TradeDocumentWithLines { document, items })
    }

    /// Replaces a document, moving balances by the difference between the
    /// old and the new settlement.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`], plus `StoreError::Rule` when the stored
    /// version cannot be reversed.
    pub async fn update(
        &self,
        kind: TradeKind,
        id: Uuid,
        input: TradeDocumentInput,
    ) -> StoreResult<TradeDocumentWithLines> {
        let checked = check_input(&input)?;
        self.check_references(kind, &input, &checked, Some(id)).await?;

        let txn = self.db.begin().await?;
        let existing = find_document(&txn, kind, id).await?;
        let old = stored_posting(&existing)?;
        let new = posting_of(kind, checked.settlement);
        let plan = EffectPlan::repost(&old, &new);

        let mut document: trade_documents::ActiveModel = existing.into();
        document.invoice_no = Set(checked.invoice_no);
        document.date = Set(input.date);
        document.party_id = Set(input.party_id);
        document.discount = Set(input.discount);
        document.tax_amount = Set(input.tax_amount);
        document.total_amount = Set(input.total_amount);
        document.grand_total = Set(input.grand_total);
        document.received = Set(input.received);
        document.payment_type = Set(input.payment_type);
        document.bank_id = Set(checked.settlement.bank_id().map(BankId::into_inner));
        document.trxn_id = Set(checked.trxn_id);
        document.notes = Set(optional_text(input.notes.as_deref()));
        document.approved_by = Set(optional_text(input.approved_by.as_deref()));
        document.updated_at = Set(Utc::now().into());
        document.update(&txn).await?;

        trade_document_lines::Entity::delete_many()
            .filter(trade_document_lines::Column::DocumentId.eq(id))
            .exec(&txn)
            .await?;
        trade_document_lines::Entity::insert_many(line_models(id, &input.items))
            .exec(&txn)
            .await?;

        apply_plan(&txn, &plan).await?;
        txn.commit().await?;

        tracing::info!(document_id = %id, kind = ?kind, effects = plan.effects().len(), "trade document updated");
        self.get(kind, id).await
    }

    /// Deletes a document and reverses its settlement.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, or `StoreError::Rule` when the stored
    /// version cannot be reversed.
    pub async fn delete(&self, kind: TradeKind, id: Uuid) -> StoreResult<()> {
        let txn = self.db.begin().await?;
        let existing = find_document(&txn, kind, id).await?;
        let plan = EffectPlan::unpost(&stored_posting(&existing)?);

        trade_document_lines::Entity::delete_many()
            .filter(trade_document_lines::Column::DocumentId.eq(id))
            .exec(&txn)
            .await?;
        existing.delete(&txn).await?;
        apply_plan(&txn, &plan).await?;
        txn.commit().await?;

        tracing::info!(document_id = %id, kind = ?kind, "trade document deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(payment_type: PaymentType, bank_id: Option<Uuid>, trxn_id: Option<&str>) -> TradeDocumentInput {
        TradeDocumentInput {
            invoice_no: "INV-1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            party_id: Uuid::new_v4(),
            discount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total_amount: dec!(100),
            grand_total: dec!(100),
            received: dec!(100),
            payment_type,
            bank_id,
            trxn_id: trxn_id.map(ToString::to_string),
            notes: None,
            approved_by: None,
            items: vec![TradeLineInput {
                item_id: Uuid::new_v4(),
                quantity: 2,
                rate: dec!(50),
                tax: Decimal::ZERO,
                mrp: dec!(55),
                total_amount: dec!(100),
            }],
        }
    }

    #[test]
    fn test_cash_document_drops_bank_details() {
        let checked = check_input(&input(PaymentType::Cash, Some(Uuid::new_v4()), Some("TX"))).unwrap();
        assert_eq!(checked.settlement.bank_id(), None);
        assert_eq!(checked.trxn_id, None);
    }

    #[test]
    fn test_bank_document_needs_bank_and_reference() {
        assert!(matches!(
            check_input(&input(PaymentType::Bank, None, Some("TX"))),
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            check_input(&input(PaymentType::Bank, Some(Uuid::new_v4()), None)),
            Err(StoreError::Validation(_))
        ));
        assert!(check_input(&input(PaymentType::Bank, Some(Uuid::new_v4()), Some("TX"))).is_ok());
    }

    #[test]
    fn test_line_aliases() {
        let body = serde_json::json!({
            "invoiceNo": "S-1",
            "date": "2026-03-01",
            "partyId": Uuid::new_v4(),
            "totalAmount": "100",
            "grandTotal": "100",
            "paymentType": "cash",
            "saleItems": [
                { "itemId": Uuid::new_v4(), "quantity": 1, "saleRate": "100", "totalAmount": "100" }
            ]
        });
        let parsed: TradeDocumentInput = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].rate, dec!(100));
        assert_eq!(parsed.received, Decimal::ZERO);
    }

    #[test]
    fn test_stored_bank_document_without_bank_cannot_be_reversed() {
        let now = Utc::now().into();
        let broken = trade_documents::Model {
            id: Uuid::new_v4(),
            kind: TradeKind::Sale,
            invoice_no: "S-9".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            party_id: Uuid::new_v4(),
            discount: Decimal::ZERO,
            tax_amount: Decimal::ZERO,
            total_amount: dec!(10),
            grand_total: dec!(10),
            received: dec!(10),
            payment_type: PaymentType::Bank,
            bank_id: None,
            trxn_id: Some("TX".to_string()),
            notes: None,
            approved_by: None,
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(stored_posting(&broken), Err(StoreError::Rule(_))));
    }
}
