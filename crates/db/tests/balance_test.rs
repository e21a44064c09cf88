//! Balance flows of balance-bearing documents against a real schema.

mod common;

use common::{day, seed_bank, seed_company, seed_item, seed_party, setup};
use khata_core::settlement::{
    BalanceAccount, BalanceBook, DocumentKind, EffectPlan, PaymentMode, Posting, Settlement,
    TransferDirection,
};
use khata_db::entities::sea_orm_active_enums::{AmountType, PayeeType, PaymentType, TradeKind};
use khata_db::repositories::{
    BankEntryInput, PaymentInput, ReceiptInput, TradeDocumentInput, TradeLineInput,
};
use khata_db::{
    BalanceRepository, BankEntryRepository, BankRepository, PartyRepository, PaymentRepository,
    ReceiptRepository, StoreError, TradeRepository,
};
use khata_shared::types::{BankId, PageRequest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

fn trade(
    invoice_no: &str,
    party_id: Uuid,
    item_id: Uuid,
    received: Decimal,
    payment_type: PaymentType,
    bank_id: Option<Uuid>,
) -> TradeDocumentInput {
    TradeDocumentInput {
        invoice_no: invoice_no.to_string(),
        date: day(1),
        party_id,
        discount: Decimal::ZERO,
        tax_amount: Decimal::ZERO,
        total_amount: received,
        grand_total: received,
        received,
        payment_type,
        bank_id,
        trxn_id: bank_id.map(|_| "UTR-1".to_string()),
        notes: None,
        approved_by: None,
        items: vec![TradeLineInput {
            item_id,
            quantity: 1,
            rate: received,
            tax: Decimal::ZERO,
            mrp: received,
            total_amount: received,
        }],
    }
}

async fn company(db: &DatabaseConnection) -> Decimal {
    BalanceRepository::new(db.clone())
        .balance(BalanceAccount::Company)
        .await
        .expect("company balance")
}

async fn bank(db: &DatabaseConnection, id: Uuid) -> Decimal {
    BalanceRepository::new(db.clone())
        .balance(BalanceAccount::Bank(BankId::from_uuid(id)))
        .await
        .expect("bank balance")
}

#[tokio::test]
async fn test_sale_create_update_delete_moves_balances() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let bank_id = seed_bank(&db, "ACC-1", dec!(500)).await;
    let party = seed_party(&db, "9800000001").await;
    let item = seed_item(&db, "IT-1").await;
    let repo = TradeRepository::new(db.clone());

    let sale = repo
        .create(
            TradeKind::Sale,
            trade("S-1", party, item, dec!(250.50), PaymentType::Cash, None),
        )
        .await
        .expect("Failed to create sale");
    assert_eq!(sale.items.len(), 1);
    assert_eq!(sale.document.bank_id, None);
    assert_eq!(company(&db).await, dec!(1250.50));

    // Switching to a bank settlement moves the money out of cash and into the bank.
    repo.update(
        TradeKind::Sale,
        sale.document.id,
        trade("S-1", party, item, dec!(75.75), PaymentType::Bank, Some(bank_id)),
    )
    .await
    .expect("Failed to update sale");
    assert_eq!(company(&db).await, dec!(1000));
    assert_eq!(bank(&db, bank_id).await, dec!(575.75));

    repo.delete(TradeKind::Sale, sale.document.id)
        .await
        .expect("Failed to delete sale");
    assert_eq!(company(&db).await, dec!(1000));
    assert_eq!(bank(&db, bank_id).await, dec!(500));
    assert!(matches!(
        repo.get(TradeKind::Sale, sale.document.id).await,
        Err(StoreError::NotFound("Sale"))
    ));
}

#[tokio::test]
async fn test_trade_kinds_move_in_their_direction() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let party = seed_party(&db, "9800000002").await;
    let item = seed_item(&db, "IT-2").await;
    let repo = TradeRepository::new(db.clone());

    let cases = [
        (TradeKind::Purchase, dec!(100), dec!(900)),
        (TradeKind::PurchaseReturn, dec!(25.25), dec!(925.25)),
        (TradeKind::Sale, dec!(50), dec!(975.25)),
        (TradeKind::SaleReturn, dec!(10.25), dec!(965)),
    ];
    for (kind, amount, expected) in cases {
        repo.create(kind, trade("DOC-1", party, item, amount, PaymentType::Cash, None))
            .await
            .expect("Failed to create document");
        assert_eq!(company(&db).await, expected, "after {kind:?}");
    }
}

#[tokio::test]
async fn test_credit_sale_leaves_balances_alone() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let party = seed_party(&db, "9800000003").await;
    let item = seed_item(&db, "IT-3").await;

    let mut input = trade("S-2", party, item, dec!(300), PaymentType::Cash, None);
    input.received = Decimal::ZERO;
    TradeRepository::new(db.clone())
        .create(TradeKind::Sale, input)
        .await
        .expect("Failed to create credit sale");

    assert_eq!(company(&db).await, dec!(1000));
}

#[tokio::test]
async fn test_invoice_numbers_are_unique_per_kind() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let party = seed_party(&db, "9800000004").await;
    let item = seed_item(&db, "IT-4").await;
    let repo = TradeRepository::new(db.clone());

    repo.create(TradeKind::Sale, trade("INV-9", party, item, dec!(10), PaymentType::Cash, None))
        .await
        .expect("Failed to create sale");

    let duplicate = repo
        .create(TradeKind::Sale, trade("INV-9", party, item, dec!(10), PaymentType::Cash, None))
        .await;
    assert!(matches!(duplicate, Err(StoreError::Duplicate(label)) if label == "Invoice number"));

    repo.create(
        TradeKind::Purchase,
        trade("INV-9", party, item, dec!(10), PaymentType::Cash, None),
    )
    .await
    .expect("Same number under another kind is allowed");

    // The rejected sale left no trace on the balance.
    assert_eq!(company(&db).await, dec!(1000));
}

#[tokio::test]
async fn test_bank_settlement_requires_bank_and_reference() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let party = seed_party(&db, "9800000005").await;
    let item = seed_item(&db, "IT-5").await;
    let repo = TradeRepository::new(db.clone());

    let without_bank = repo
        .create(TradeKind::Sale, trade("S-3", party, item, dec!(10), PaymentType::Bank, None))
        .await;
    assert!(matches!(without_bank, Err(StoreError::Validation(_))));

    let mut without_reference =
        trade("S-3", party, item, dec!(10), PaymentType::Bank, Some(Uuid::new_v4()));
    without_reference.trxn_id = None;
    assert!(matches!(
        repo.create(TradeKind::Sale, without_reference).await,
        Err(StoreError::Validation(_))
    ));

    let unknown_bank = repo
        .create(
            TradeKind::Sale,
            trade("S-3", party, item, dec!(10), PaymentType::Bank, Some(Uuid::new_v4())),
        )
        .await;
    assert!(matches!(unknown_bank, Err(StoreError::NotFound("Bank"))));
}

#[tokio::test]
async fn test_referenced_party_and_bank_cannot_be_deleted() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let bank_id = seed_bank(&db, "ACC-9", dec!(500)).await;
    let party = seed_party(&db, "9800000009").await;
    let item = seed_item(&db, "IT-9").await;
    let repo = TradeRepository::new(db.clone());
    let parties = PartyRepository::new(db.clone());
    let banks = BankRepository::new(db.clone());

    let sale = repo
        .create(
            TradeKind::Sale,
            trade("S-9", party, item, dec!(60.25), PaymentType::Bank, Some(bank_id)),
        )
        .await
        .expect("Failed to create sale");

    assert!(matches!(parties.delete(party).await, Err(StoreError::Conflict(_))));
    assert!(matches!(banks.delete(bank_id).await, Err(StoreError::Conflict(_))));
    assert_eq!(bank(&db, bank_id).await, dec!(560.25));

    repo.delete(TradeKind::Sale, sale.document.id)
        .await
        .expect("Failed to delete sale");
    parties.delete(party).await.expect("Failed to delete party");
    banks.delete(bank_id).await.expect("Failed to delete bank");
}

#[tokio::test]
async fn test_missing_company_aborts_the_whole_document() {
    let db = setup().await;
    let party = seed_party(&db, "9800000006").await;
    let item = seed_item(&db, "IT-6").await;
    let repo = TradeRepository::new(db.clone());

    let result = repo
        .create(TradeKind::Sale, trade("S-4", party, item, dec!(10), PaymentType::Cash, None))
        .await;
    assert!(matches!(result, Err(StoreError::NotFound("Company"))));

    let page = repo
        .list(TradeKind::Sale, &PageRequest::default())
        .await
        .expect("Failed to list sales");
    assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn test_sub_cent_amounts_never_reach_a_balance() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let party = seed_party(&db, "9800000010").await;
    let item = seed_item(&db, "IT-10").await;

    let receipt = ReceiptRepository::new(db.clone())
        .create(ReceiptInput {
            receipt_no: "R-5".to_string(),
            date: day(2),
            party_id: party,
            amount: dec!(0.005),
            payment_type: PaymentType::Cash,
            bank_id: None,
            trxn_id: None,
            notes: None,
        })
        .await;
    assert!(matches!(receipt, Err(StoreError::Validation(_))));

    let sale = TradeRepository::new(db.clone())
        .create(
            TradeKind::Sale,
            trade("S-10", party, item, dec!(10.001), PaymentType::Cash, None),
        )
        .await;
    assert!(matches!(sale, Err(StoreError::Validation(_))));

    assert_eq!(company(&db).await, dec!(1000));
}

#[tokio::test]
async fn test_missing_documents_roll_back_cleanly() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let party = seed_party(&db, "9800000011").await;
    let item = seed_item(&db, "IT-11").await;
    let missing = Uuid::new_v4();

    let receipt = ReceiptInput {
        receipt_no: "R-6".to_string(),
        date: day(2),
        party_id: party,
        amount: dec!(40.75),
        payment_type: PaymentType::Cash,
        bank_id: None,
        trxn_id: None,
        notes: None,
    };
    let receipts = ReceiptRepository::new(db.clone());
    assert!(matches!(
        receipts.update(missing, receipt).await,
        Err(StoreError::NotFound("Receipt"))
    ));
    assert!(matches!(receipts.delete(missing).await, Err(StoreError::NotFound("Receipt"))));

    let trades = TradeRepository::new(db.clone());
    assert!(matches!(
        trades
            .update(
                TradeKind::Purchase,
                missing,
                trade("P-11", party, item, dec!(40.75), PaymentType::Cash, None),
            )
            .await,
        Err(StoreError::NotFound("Purchase"))
    ));

    // The connection is usable again and nothing moved.
    assert_eq!(company(&db).await, dec!(1000));
}

#[tokio::test]
async fn test_receipts_and_payments() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let bank_id = seed_bank(&db, "ACC-2", dec!(500)).await;
    let party = seed_party(&db, "9800000007").await;

    let receipts = ReceiptRepository::new(db.clone());
    let receipt = receipts
        .create(ReceiptInput {
            receipt_no: "R-1".to_string(),
            date: day(2),
            party_id: party,
            amount: dec!(120.50),
            payment_type: PaymentType::Bank,
            bank_id: Some(bank_id),
            trxn_id: Some("UTR-9".to_string()),
            notes: None,
        })
        .await
        .expect("Failed to create receipt");
    assert_eq!(bank(&db, bank_id).await, dec!(620.50));

    let payments = PaymentRepository::new(db.clone());
    let payment = payments
        .create(PaymentInput {
            payment_no: "P-1".to_string(),
            date: day(2),
            payee_type: PayeeType::Party,
            payee_id: party,
            amount: dec!(50.25),
            payment_type: PaymentType::Cash,
            bank_id: None,
            trxn_id: None,
            notes: Some("advance".to_string()),
        })
        .await
        .expect("Failed to create payment");
    assert_eq!(company(&db).await, dec!(949.75));

    receipts.delete(receipt.id).await.expect("Failed to delete receipt");
    payments.delete(payment.id).await.expect("Failed to delete payment");
    assert_eq!(bank(&db, bank_id).await, dec!(500));
    assert_eq!(company(&db).await, dec!(1000));
}

#[tokio::test]
async fn test_payment_payee_must_exist_in_its_table() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let party = seed_party(&db, "9800000008").await;

    let result = PaymentRepository::new(db.clone())
        .create(PaymentInput {
            payment_no: "P-2".to_string(),
            date: day(3),
            // A party id is not a vehicle.
            payee_type: PayeeType::Vehicle,
            payee_id: party,
            amount: dec!(10),
            payment_type: PaymentType::Cash,
            bank_id: None,
            trxn_id: None,
            notes: None,
        })
        .await;
    assert!(matches!(result, Err(StoreError::NotFound("Vehicle"))));
    assert_eq!(company(&db).await, dec!(1000));
}

#[tokio::test]
async fn test_payments_may_overdraw_cash() {
    let db = setup().await;
    seed_company(&db, dec!(100)).await;
    let party = seed_party(&db, "9800000009").await;

    PaymentRepository::new(db.clone())
        .create(PaymentInput {
            payment_no: "P-3".to_string(),
            date: day(3),
            payee_type: PayeeType::Party,
            payee_id: party,
            amount: dec!(350),
            payment_type: PaymentType::Cash,
            bank_id: None,
            trxn_id: None,
            notes: None,
        })
        .await
        .expect("Overdraft is allowed");
    assert_eq!(company(&db).await, dec!(-250));
}

#[tokio::test]
async fn test_bank_entries_move_cash_between_company_and_bank() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let bank_id = seed_bank(&db, "ACC-3", dec!(500)).await;
    let repo = BankEntryRepository::new(db.clone());

    let entry = repo
        .create(BankEntryInput {
            trxn_number: "BE-1".to_string(),
            date: day(4),
            bank_id,
            amount: dec!(200),
            amount_type: AmountType::Deposit,
            trxn_id: "DEP-1".to_string(),
            notes: None,
        })
        .await
        .expect("Failed to create bank entry");
    assert_eq!(company(&db).await, dec!(800));
    assert_eq!(bank(&db, bank_id).await, dec!(700));

    repo.update(
        entry.id,
        BankEntryInput {
            trxn_number: "BE-1".to_string(),
            date: day(4),
            bank_id,
            amount: dec!(100),
            amount_type: AmountType::Withdraw,
            trxn_id: "WD-1".to_string(),
            notes: None,
        },
    )
    .await
    .expect("Failed to update bank entry");
    assert_eq!(company(&db).await, dec!(1100));
    assert_eq!(bank(&db, bank_id).await, dec!(400));

    repo.delete(entry.id).await.expect("Failed to delete bank entry");
    assert_eq!(company(&db).await, dec!(1000));
    assert_eq!(bank(&db, bank_id).await, dec!(500));
}

#[tokio::test]
async fn test_stored_balances_match_the_in_memory_book() {
    let db = setup().await;
    seed_company(&db, dec!(1000)).await;
    let bank_id = seed_bank(&db, "ACC-4", dec!(500)).await;
    let party = seed_party(&db, "9800000010").await;
    let item = seed_item(&db, "IT-10").await;
    let bank_key = BankId::from_uuid(bank_id);

    let mut book = BalanceBook::new()
        .with_opening(BalanceAccount::Company, dec!(1000))
        .with_opening(BalanceAccount::Bank(bank_key), dec!(500));

    let trades = TradeRepository::new(db.clone());
    let sale = trades
        .create(TradeKind::Sale, trade("S-10", party, item, dec!(80.50), PaymentType::Cash, None))
        .await
        .expect("Failed to create sale");
    let cash_sale = Posting::settled(
        DocumentKind::Sale,
        Settlement::cash(dec!(80.50)).expect("cash settlement"),
    );
    book.apply(&EffectPlan::post(&cash_sale));

    trades
        .update(
            TradeKind::Sale,
            sale.document.id,
            trade("S-10", party, item, dec!(60.25), PaymentType::Bank, Some(bank_id)),
        )
        .await
        .expect("Failed to update sale");
    let bank_sale = Posting::settled(
        DocumentKind::Sale,
        Settlement::new(PaymentMode::Bank, Some(bank_key), dec!(60.25)).expect("bank settlement"),
    );
    book.apply(&EffectPlan::repost(&cash_sale, &bank_sale));

    BankEntryRepository::new(db.clone())
        .create(BankEntryInput {
            trxn_number: "BE-10".to_string(),
            date: day(5),
            bank_id,
            amount: dec!(40.75),
            amount_type: AmountType::Withdraw,
            trxn_id: "WD-10".to_string(),
            notes: None,
        })
        .await
        .expect("Failed to create bank entry");
    book.apply(&EffectPlan::post(
        &Posting::bank_transfer(bank_key, TransferDirection::Withdraw, dec!(40.75))
            .expect("transfer"),
    ));

    assert_eq!(company(&db).await, book.balance(BalanceAccount::Company));
    assert_eq!(bank(&db, bank_id).await, book.balance(BalanceAccount::Bank(bank_key)));

    let summary = BalanceRepository::new(db.clone())
        .summary()
        .await
        .expect("Failed to read summary");
    assert_eq!(summary.company, Some(book.balance(BalanceAccount::Company)));
    assert_eq!(summary.banks.len(), 1);
}
