//! Receipt repository. A receipt brings money in from a party.

use chrono::{NaiveDate, Utc};
use khata_core::settlement::{DocumentKind, EffectPlan, PaymentMode, Posting, Settlement};
use khata_core::validation::{bank_reference, optional_text, validate_cash_document};
use khata_shared::types::{BankId, PageRequest, PageResponse};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::balance::{apply_plan, ensure_settlement_target, stored_settlement};
use super::{ensure_unique, fetch_page, find_required};
use crate::entities::{parties, receipts, sea_orm_active_enums::PaymentType};
use crate::error::StoreResult;

/// Body of a receipt.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptInput {
    /// Receipt number, unique.
    #[validate(length(min = 1))]
    pub receipt_no: String,
    /// Receipt date.
    pub date: NaiveDate,
    /// Paying party.
    pub party_id: Uuid,
    /// Amount received.
    pub amount: Decimal,
    /// Cash or bank.
    pub payment_type: PaymentType,
    /// Bank for bank receipts.
    pub bank_id: Option<Uuid>,
    /// Bank transaction reference for bank receipts.
    pub trxn_id: Option<String>,
    /// Free text.
    pub notes: Option<String>,
}

fn stored_posting(receipt: &receipts::Model) -> StoreResult<Posting> {
    let settlement = stored_settlement(receipt.payment_type.into(), receipt.bank_id, receipt.amount)?;
    Ok(Posting::settled(DocumentKind::Receipt, settlement))
}

/// Receipt repository.
#[derive(Debug, Clone)]
pub struct ReceiptRepository {
    db: DatabaseConnection,
}

impl ReceiptRepository {
    /// Creates a new receipt repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check(
        &self,
        input: &ReceiptInput,
        except: Option<Uuid>,
    ) -> StoreResult<(String, Option<String>, Settlement)> {
        let receipt_no = validate_cash_document("receiptNo", &input.receipt_no, input.amount)?;
        let mode = PaymentMode::from(input.payment_type);
        let settlement = Settlement::new(mode, input.bank_id.map(BankId::from_uuid), input.amount)?;
        let trxn_id = bank_reference(mode, input.trxn_id.as_deref())?;

        let mut duplicate =
            receipts::Entity::find().filter(receipts::Column::ReceiptNo.eq(&receipt_no));
        if let Some(id) = except {
            duplicate = duplicate.filter(receipts::Column::Id.ne(id));
        }
        ensure_unique(&self.db, duplicate, "Receipt number").await?;
        find_required::<parties::Entity, _>(&self.db, input.party_id, "Party").await?;
        ensure_settlement_target(&self.db, &settlement).await?;

        Ok((receipt_no, trxn_id, settlement))
    }

    /// Records a receipt and credits the receiving balance.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `StoreError::Duplicate` for a reused
    /// number or `StoreError::NotFound` for a missing party, bank or company.
    pub async fn create(&self, input: ReceiptInput) -> StoreResult<receipts::Model> {
        let (receipt_no, trxn_id, settlement) = self.check(&input, None).await?;
        let now = Utc::now().into();

        let txn = self.db.begin().await?;
        let receipt = receipts::ActiveModel {
            id: Set(Uuid::new_v4()),
            receipt_no: Set(receipt_no),
            date: Set(input.date),
            party_id: Set(input.party_id),
            amount: Set(input.amount),
            payment_type: Set(input.payment_type),
            bank_id: Set(settlement.bank_id().map(BankId::into_inner)),
            trxn_id: Set(trxn_id),
            notes: Set(optional_text(input.notes.as_deref())),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;
        apply_plan(&txn, &EffectPlan::post(&Posting::settled(DocumentKind::Receipt, settlement)))
            .await?;
        txn.commit().await?;

        tracing::info!(receipt_id = %receipt.id, amount = %receipt.amount, "receipt created");
        Ok(receipt)
    }

    /// Lists receipts, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<receipts::Model>> {
        let query = receipts::Entity::find()
            .order_by_desc(receipts::Column::Date)
            .order_by_desc(receipts::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a receipt by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the receipt does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<receipts::Model> {
        find_required::<receipts::Entity, _>(&self.db, id, "Receipt").await
    }

    /// Replaces a receipt and moves balances by the difference.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`], plus `StoreError::Rule` when the stored
    /// receipt cannot be reversed.
    pub async fn update(&self, id: Uuid, input: ReceiptInput) -> StoreResult<receipts::Model> {
        let (receipt_no, trxn_id, settlement) = self.check(&input, Some(id)).await?;

        let txn = self.db.begin().await?;
        let existing = find_required::<receipts::Entity, _>(&txn, id, "Receipt").await?;
        let old = stored_posting(&existing)?;
        let plan = EffectPlan::repost(&old, &Posting::settled(DocumentKind::Receipt, settlement));
        let mut receipt: receipts::ActiveModel = existing.into();
        receipt.receipt_no = Set(receipt_no);
        receipt.date = Set(input.date);
        receipt.party_id = Set(input.party_id);
        receipt.amount = Set(input.amount);
        receipt.payment_type = Set(input.payment_type);
        receipt.bank_id = Set(settlement.bank_id().map(BankId::into_inner));
        receipt.trxn_id = Set(trxn_id);
        receipt.notes = Set(optional_text(input.notes.as_deref()));
        receipt.updated_at = Set(Utc::now().into());
        let receipt = receipt.update(&txn).await?;
        apply_plan(&txn, &plan).await?;
        txn.commit().await?;

        tracing::info!(receipt_id = %id, "receipt updated");
        Ok(receipt)
    }

    /// Deletes a receipt and reverses its effect.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, or `StoreError::Rule` when the stored
    /// receipt cannot be reversed.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let txn = self.db.begin().await?;
        let existing = find_required::<receipts::Entity, _>(&txn, id, "Receipt").await?;
        let plan = EffectPlan::unpost(&stored_posting(&existing)?);

        existing.delete(&txn).await?;
        apply_plan(&txn, &plan).await?;
        txn.commit().await?;

        tracing::info!(receipt_id = %id, "receipt deleted");
        Ok(())
    }
}
