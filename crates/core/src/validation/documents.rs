//! Per-document rules.

use rust_decimal::Decimal;

use super::{ValidationError, non_negative, positive, positive_quantity, required_text};
use crate::settlement::PaymentMode;

/// Amounts on one sale, purchase or return line.
#[derive(Debug, Clone, Copy)]
pub struct TradeLine {
    /// Units moved.
    pub quantity: i32,
    /// Unit sale or purchase rate.
    pub rate: Decimal,
    /// Tax on the line.
    pub tax: Decimal,
    /// Printed retail price.
    pub mrp: Decimal,
    /// Line total.
    pub total_amount: Decimal,
}

/// Header amounts of a trade document.
#[derive(Debug, Clone, Copy)]
pub struct TradeTotals {
    /// Discount granted (zero on returns).
    pub discount: Decimal,
    /// Tax across lines.
    pub tax_amount: Decimal,
    /// Total before tax and discount.
    pub total_amount: Decimal,
    /// Amount due.
    pub grand_total: Decimal,
    /// Amount actually settled; this is what moves a balance.
    pub received: Decimal,
}

/// One journal particular.
#[derive(Debug, Clone, Copy)]
pub struct JournalLine<'a> {
    /// Narration.
    pub particular: &'a str,
    /// Amount.
    pub amount: Decimal,
}

/// Validates a sale, purchase, sale return or purchase return.
///
/// Returns the trimmed invoice number.
///
/// # Errors
///
/// Returns the first rule the document breaks.
pub fn validate_trade_document(
    invoice_no: &str,
    totals: &TradeTotals,
    lines: &[TradeLine],
) -> Result<String, ValidationError> {
    let invoice_no = required_text("invoiceNo", invoice_no)?;

    non_negative("discount", totals.discount)?;
    non_negative("taxAmount", totals.tax_amount)?;
    non_negative("totalAmount", totals.total_amount)?;
    non_negative("grandTotal", totals.grand_total)?;
    non_negative("received", totals.received)?;

    if lines.is_empty() {
        return Err(ValidationError::Empty("item"));
    }
    for line in lines {
        positive_quantity("quantity", line.quantity)?;
        non_negative("rate", line.rate)?;
        non_negative("tax", line.tax)?;
        non_negative("mrp", line.mrp)?;
        non_negative("line totalAmount", line.total_amount)?;
    }

    Ok(invoice_no)
}

/// Bank transaction reference for a settlement.
///
/// Bank mode needs one; cash mode never stores one.
///
/// # Errors
///
/// Returns `ValidationError::Required` for bank mode without a reference.
pub fn bank_reference(
    mode: PaymentMode,
    trxn_id: Option<&str>,
) -> Result<Option<String>, ValidationError> {
    match mode {
        PaymentMode::Cash => Ok(None),
        PaymentMode::Bank => trxn_id
            .map(|id| required_text("trxnId", id))
            .transpose()?
            .map(Some)
            .ok_or(ValidationError::Required("trxnId")),
    }
}

/// Validates a receipt or payment. Returns the trimmed document number.
///
/// # Errors
///
/// Rejects a blank number or a non-positive amount.
pub fn validate_cash_document(
    number_field: &'static str,
    number: &str,
    amount: Decimal,
) -> Result<String, ValidationError> {
    let number = required_text(number_field, number)?;
    positive("amount", amount)?;
    Ok(number)
}

/// Validates a bank entry. Returns the trimmed transaction number and reference.
///
/// # Errors
///
/// Rejects blank identifiers or a non-positive amount.
pub fn validate_bank_entry(
    trxn_number: &str,
    trxn_id: &str,
    amount: Decimal,
) -> Result<(String, String), ValidationError> {
    let trxn_number = required_text("trxnNumber", trxn_number)?;
    let trxn_id = required_text("trxnId", trxn_id)?;
    positive("amount", amount)?;
    Ok((trxn_number, trxn_id))
}

/// # Errors
///
/// Rejects an empty journal, a blank particular or a non-positive amount.
pub fn validate_journal(lines: &[JournalLine<'_>]) -> Result<(), ValidationError> {
    if lines.is_empty() {
        return Err(ValidationError::Empty("particular"));
    }
    for line in lines {
        required_text("particular", line.particular)?;
        positive("amount", line.amount)?;
    }
    Ok(())
}

/// Validates a vehicle stock movement. Returns the trimmed stock number.
///
/// # Errors
///
/// Rejects a blank number, no lines, or a line quantity below one.
pub fn validate_vehicle_stock(stock_no: &str, quantities: &[i32]) -> Result<String, ValidationError> {
    let stock_no = required_text("stockNo", stock_no)?;
    if quantities.is_empty() {
        return Err(ValidationError::Empty("stock item"));
    }
    for quantity in quantities {
        positive_quantity("quantity", *quantity)?;
    }
    Ok(stock_no)
}

/// Validates a damage record. Returns the trimmed damage id.
///
/// # Errors
///
/// Rejects a blank id or a quantity below one.
pub fn validate_damage_stock(damage_id: &str, quantity: i32) -> Result<String, ValidationError> {
    let damage_id = required_text("damageId", damage_id)?;
    positive_quantity("quantity", quantity)?;
    Ok(damage_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn totals() -> TradeTotals {
        TradeTotals {
            discount: dec!(0),
            tax_amount: dec!(13),
            total_amount: dec!(100),
            grand_total: dec!(113),
            received: dec!(113),
        }
    }

    fn line(quantity: i32) -> TradeLine {
        TradeLine {
            quantity,
            rate: dec!(50),
            tax: dec!(6.5),
            mrp: dec!(60),
            total_amount: dec!(56.5),
        }
    }

    #[test]
    fn test_valid_trade_document() {
        let invoice = validate_trade_document(" INV-7 ", &totals(), &[line(1), line(2)]).unwrap();
        assert_eq!(invoice, "INV-7");
    }

    #[test]
    fn test_credit_sale_with_nothing_received_is_valid() {
        let mut credit = totals();
        credit.received = Decimal::ZERO;
        assert!(validate_trade_document("INV-8", &credit, &[line(1)]).is_ok());
    }

    #[rstest]
    #[case("", vec![line(1)], ValidationError::Required("invoiceNo"))]
    #[case("INV-1", vec![], ValidationError::Empty("item"))]
    #[case("INV-1", vec![line(0)], ValidationError::NotPositive("quantity"))]
    fn test_invalid_trade_document(
        #[case] invoice: &str,
        #[case] lines: Vec<TradeLine>,
        #[case] expected: ValidationError,
    ) {
        assert_eq!(validate_trade_document(invoice, &totals(), &lines), Err(expected));
    }

    #[test]
    fn test_negative_header_amount() {
        let mut bad = totals();
        bad.discount = dec!(-1);
        assert_eq!(
            validate_trade_document("INV-1", &bad, &[line(1)]),
            Err(ValidationError::Negative("discount"))
        );
    }

    #[test]
    fn test_bank_reference() {
        assert_eq!(bank_reference(PaymentMode::Cash, Some("TX-1")), Ok(None));
        assert_eq!(
            bank_reference(PaymentMode::Bank, Some(" TX-1 ")),
            Ok(Some("TX-1".to_string()))
        );
        assert_eq!(
            bank_reference(PaymentMode::Bank, None),
            Err(ValidationError::Required("trxnId"))
        );
        assert_eq!(
            bank_reference(PaymentMode::Bank, Some("  ")),
            Err(ValidationError::Required("trxnId"))
        );
    }

    #[test]
    fn test_cash_document() {
        assert_eq!(validate_cash_document("receiptNo", "R-1", dec!(10)).unwrap(), "R-1");
        assert_eq!(
            validate_cash_document("receiptNo", "R-1", Decimal::ZERO),
            Err(ValidationError::NotPositive("amount"))
        );
        assert_eq!(
            validate_cash_document("paymentNo", " ", dec!(10)),
            Err(ValidationError::Required("paymentNo"))
        );
    }

    #[test]
    fn test_bank_entry() {
        assert_eq!(
            validate_bank_entry("BE-1", "UTR1", dec!(5)).unwrap(),
            ("BE-1".to_string(), "UTR1".to_string())
        );
        assert!(validate_bank_entry("BE-1", "", dec!(5)).is_err());
    }

    #[test]
    fn test_journal() {
        let ok = [JournalLine {
            particular: "Rent for March",
            amount: dec!(1500),
        }];
        assert!(validate_journal(&ok).is_ok());
        assert_eq!(validate_journal(&[]), Err(ValidationError::Empty("particular")));

        let blank = [JournalLine {
            particular: " ",
            amount: dec!(1),
        }];
        assert_eq!(validate_journal(&blank), Err(ValidationError::Required("particular")));
    }

    #[rstest]
    #[case::received(|t: &mut TradeTotals, _: &mut TradeLine| t.received = dec!(113.001))]
    #[case::discount(|t: &mut TradeTotals, _: &mut TradeLine| t.discount = dec!(0.125))]
    #[case::line_rate(|_: &mut TradeTotals, l: &mut TradeLine| l.rate = dec!(49.995))]
    fn test_trade_document_rejects_sub_cent_amounts(
        #[case] tamper: fn(&mut TradeTotals, &mut TradeLine),
    ) {
        let mut header = totals();
        let mut first = line(1);
        tamper(&mut header, &mut first);
        assert!(matches!(
            validate_trade_document("INV-9", &header, &[first]),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[rstest]
    #[case::receipt(validate_cash_document("receiptNo", "R-2", dec!(0.005)).map(|_| ()))]
    #[case::bank_entry(validate_bank_entry("BE-2", "UTR2", dec!(12.345)).map(|_| ()))]
    #[case::journal(validate_journal(&[JournalLine { particular: "Rent", amount: dec!(1.001) }]))]
    fn test_documents_reject_sub_cent_amounts(#[case] result: Result<(), ValidationError>) {
        assert!(matches!(result, Err(ValidationError::InvalidFormat { .. })));
    }

    #[test]
    fn test_stock_rules() {
        assert_eq!(validate_vehicle_stock("VS-1", &[3, 4]).unwrap(), "VS-1");
        assert_eq!(
            validate_vehicle_stock("VS-1", &[]),
            Err(ValidationError::Empty("stock item"))
        );
        assert_eq!(
            validate_damage_stock("D-1", -2),
            Err(ValidationError::NotPositive("quantity"))
        );
    }
}
