//! Payment repository. A payment sends money out to a party, a vehicle, a
//! staff member or a ledger group.

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
use crate::entities::{
    ledger_groups, members, parties, payments,
    sea_orm_active_enums::{PayeeType, PaymentType},
    vehicles,
};
use crate::error::StoreResult;

/// Body of a payment.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInput {
    /// Payment number, unique.
    #[validate(length(min = 1))]
    pub payment_no: String,
    /// Payment date.
    pub date: NaiveDate,
    /// Kind of payee.
    pub payee_type: PayeeType,
    /// Payee row in the table named by `payee_type`.
    pub payee_id: Uuid,
    /// Amount paid.
    pub amount: Decimal,
    /// Cash or bank.
    pub payment_type: PaymentType,
    /// Bank for bank payments.
    pub bank_id: Option<Uuid>,
    /// Bank transaction reference for bank payments.
    pub trxn_id: Option<String>,
    /// Free text.
    pub notes: Option<String>,
}

fn stored_posting(payment: &payments::Model) -> StoreResult<Posting> {
    let settlement = stored_settlement(payment.payment_type.into(), payment.bank_id, payment.amount)?;
    Ok(Posting::settled(DocumentKind::Payment, settlement))
}

/// Payment repository.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn check_payee(&self, payee_type: PayeeType, payee_id: Uuid) -> StoreResult<()> {
        let label = payee_type.label();
        match payee_type {
            PayeeType::Party => {
                find_required::<parties::Entity, _>(&self.db, payee_id, label).await?;
            }
            PayeeType::Vehicle => {
                find_required::<vehicles::Entity, _>(&self.db, payee_id, label).await?;
            }
            PayeeType::Staff => {
                find_required::<members::Entity, _>(&self.db, payee_id, label).await?;
            }
            PayeeType::Group => {
                find_required::<ledger_groups::Entity, _>(&self.db, payee_id, label).await?;
            }
        }
        Ok(())
    }

    async fn check(
        &self,
        input: &PaymentInput,
        except: Option<Uuid>,
    ) -> StoreResult<(String, Option<String>, Settlement)> {
        let payment_no = validate_cash_document("paymentNo", &input.payment_no, input.amount)?;
        let mode = PaymentMode::from(input.payment_type);
        let settlement = Settlement::new(mode, input.bank_id.map(BankId::from_uuid), input.amount)?;
        let trxn_id = bank_reference(mode, input.trxn_id.as_deref())?;

        let mut duplicate =
            payments::Entity::find().filter(payments::Column::PaymentNo.eq(&payment_no));
        if let Some(id) = except {
            duplicate = duplicate.filter(payments::Column::Id.ne(id));
        }
        ensure_unique(&self.db, duplicate, "Payment number").await?;
        self.check_payee(input.payee_type, input.payee_id).await?;
        ensure_settlement_target(&self.db, &settlement).await?;

        Ok((payment_no, trxn_id, settlement))
    }

    /// Records a payment and debits the paying balance.
    ///
    /// # Errors
    ///
    /// Returns a validation error, `StoreError::Duplicate` for a reused
    /// number or `StoreError::NotFound` for a missing payee, bank or company.
    pub async fn create(&self, input: PaymentInput) -> StoreResult<payments::Model> {
        let (payment_no, trxn_id, settlement) = self.check(&input, None).await?;
        let now = Utc::now().into();

        let txn = self.db.begin().await?;
        let payment = payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            payment_no: Set(payment_no),
            date: Set(input.date),
            payee_type: Set(input.payee_type),
            payee_id: Set(input.payee_id),
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
        apply_plan(&txn, &EffectPlan::post(&Posting::settled(DocumentKind::Payment, settlement)))
            .await?;
        txn.commit().await?;

        tracing::info!(
            payment_id = %payment.id,
            payee_type = ?payment.payee_type,
            amount = %payment.amount,
            "payment created"
        );
        Ok(payment)
    }

    /// Lists payments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> StoreResult<PageResponse<payments::Model>> {
        let query = payments::Entity::find()
            .order_by_desc(payments::Column::Date)
            .order_by_desc(payments::Column::CreatedAt);
        fetch_page(&self.db, query, page).await
    }

    /// Finds a payment by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the payment does not exist.
    pub async fn get(&self, id: Uuid) -> StoreResult<payments::Model> {
        find_required::<payments::Entity, _>(&self.db, id, "Payment").await
    }

    /// Replaces a payment and moves balances by the difference.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`], plus `StoreError::Rule` when the stored
    /// payment cannot be reversed.
    pub async fn update(&self, id: Uuid, input: PaymentInput) -> StoreResult<payments::Model> {
        let (payment_no, trxn_id, settlement) = self.check(&input, Some(id)).await?;

        let txn = self.db.begin().await?;
        let existing = find_required::<payments::Entity, _>(&txn, id, "Payment").await?;
        let old = stored_posting(&existing)?;
        let plan = EffectPlan::repost(&old, &Posting::settled(DocumentKind::Payment, settlement));
        let mut payment: payments::ActiveModel = existing.into();
        payment.payment_no = Set(payment_no);
        payment.date = Set(input.date);
        payment.payee_type = Set(input.payee_type);
        payment.payee_id = Set(input.payee_id);
        payment.amount = Set(input.amount);
        payment.payment_type = Set(input.payment_type);
        payment.bank_id = Set(settlement.bank_id().map(BankId::into_inner));
        payment.trxn_id = Set(trxn_id);
        payment.notes = Set(optional_text(input.notes.as_deref()));
        payment.updated_at = Set(Utc::now().into());
        let payment = payment.update(&txn).await?;
        apply_plan(&txn, &plan).await?;
        txn.commit().await?;

        tracing::info!(payment_id = %id, "payment updated");
        Ok(payment)
    }

    /// Deletes a payment and reverses its effect.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, or `StoreError::Rule` when the stored
    /// payment cannot be reversed.
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let txn = self.db.begin().await?;
        let existing = find_required::<payments::Entity, _>(&txn, id, "Payment").await?;
        let plan = EffectPlan::unpost(&stored_posting(&existing)?);

        existing.delete(&txn).await?;
        apply_plan(&txn, &plan).await?;
        txn.commit().await?;

        tracing::info!(payment_id = %id, "payment deleted");
        Ok(())
    }
}
