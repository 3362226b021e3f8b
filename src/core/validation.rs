use rust_decimal::Decimal;

use super::codes::{DocType, is_known_currency_id};
use super::cuit::validate_cuit;
use super::error::ValidationError;
use super::types::Invoice;

/// Highest point-of-sale number the service accepts.
const MAX_POINT_OF_SALE: u32 = 99_999;

/// Validate an invoice against the rules WSFEv1 enforces server-side.
/// Returns all validation errors found (not just the first).
///
/// Validation is advisory — the client never runs it implicitly, the
/// remote service remains the authority.
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if invoice.point_of_sale == 0 || invoice.point_of_sale > MAX_POINT_OF_SALE {
        errors.push(ValidationError::new(
            "point_of_sale",
            format!("must be between 1 and {MAX_POINT_OF_SALE}"),
        ));
    }

    if invoice.number_from == 0 {
        errors.push(ValidationError::new(
            "number_from",
            "invoice numbering starts at 1",
        ));
    }
    if invoice.number_from > invoice.number_to {
        errors.push(ValidationError::new(
            "number_from",
            "range start exceeds range end",
        ));
    }

    // ImpTotal = ImpTotConc + ImpNeto + ImpOpEx + ImpIVA + ImpTrib
    let expected_total = invoice.non_taxable
        + invoice.net
        + invoice.exempt
        + invoice.vat_total
        + invoice.tax_total;
    if invoice.total != expected_total {
        errors.push(ValidationError::new(
            "total",
            format!(
                "must equal non_taxable + net + exempt + vat_total + tax_total ({expected_total})"
            ),
        ));
    }

    let vat_sum: Decimal = invoice.vat_items.iter().map(|v| v.amount).sum();
    if invoice.vat_total != vat_sum {
        errors.push(ValidationError::new(
            "vat_total",
            format!("must equal the sum of VAT items ({vat_sum})"),
        ));
    }

    let tax_sum: Decimal = invoice.taxes.iter().map(|t| t.amount).sum();
    if invoice.tax_total != tax_sum {
        errors.push(ValidationError::new(
            "tax_total",
            format!("must equal the sum of tax items ({tax_sum})"),
        ));
    }

    for (i, item) in invoice.vat_items.iter().enumerate() {
        if item.base <= Decimal::ZERO {
            errors.push(ValidationError::new(
                format!("vat_items.{i}.base"),
                "taxable base must be positive",
            ));
        }
    }

    // Service concepts must carry the service period and the payment due date
    if invoice.concept.includes_services() {
        if invoice.service_from.is_none() || invoice.service_to.is_none() {
            errors.push(ValidationError::new(
                "service_from",
                "service concepts require the service period",
            ));
        }
        if invoice.due_date.is_none() {
            errors.push(ValidationError::new(
                "due_date",
                "service concepts require a payment due date",
            ));
        }
    }
    if let (Some(from), Some(to)) = (invoice.service_from, invoice.service_to) {
        if from > to {
            errors.push(ValidationError::new(
                "service_from",
                "service period start exceeds end",
            ));
        }
    }

    // Credit and debit notes reference the documents they adjust
    if invoice.invoice_type.is_note() && invoice.associated.is_empty() {
        errors.push(ValidationError::new(
            "associated",
            "credit/debit notes must reference at least one associated invoice",
        ));
    }

    if invoice.doc_type == DocType::Cuit {
        let digits = format!("{:011}", invoice.doc_number);
        if let Err(e) = validate_cuit(&digits) {
            errors.push(ValidationError::new("doc_number", e.reason));
        }
    }

    if invoice.currency_id.trim().is_empty() {
        errors.push(ValidationError::new(
            "currency_id",
            "currency identifier must not be empty",
        ));
    } else if !is_known_currency_id(&invoice.currency_id) {
        errors.push(ValidationError::new(
            "currency_id",
            format!("'{}' is not a known MonId", invoice.currency_id),
        ));
    }
    if invoice.currency_rate <= Decimal::ZERO {
        errors.push(ValidationError::new(
            "currency_rate",
            "exchange rate must be positive",
        ));
    } else if invoice.currency_id == "PES" && invoice.currency_rate != Decimal::ONE {
        errors.push(ValidationError::new(
            "currency_rate",
            "peso invoices must quote a rate of 1",
        ));
    }

    errors
}
