use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::codes::{Concept, DocType, InvoiceType};
use super::error::WsfeError;
use super::types::*;

/// Builder for a WSFEv1 authorization request.
///
/// Create with the invoice type and point of sale, populate the scalar
/// fields and the three sub-collections, then `build()`:
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use wsfe::core::*;
///
/// let invoice = InvoiceBuilder::new(InvoiceType::FacturaB, 4001)
///     .concept(Concept::Products)
///     .document(DocType::Cuit, 20_267_565_393)
///     .number_range(11, 11)
///     .issue_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
///     .net(dec!(100.00))
///     .vat_total(dec!(21.00))
///     .tax_total(dec!(1.00))
///     .total(dec!(122.00))
///     .add_vat(VatItem::new(VatRate::Standard21, dec!(100.00), dec!(21.00)))
///     .add_tax(TaxItem::new(TaxKind::Municipal, "Imp. municipal", dec!(100.00), dec!(1), dec!(1.00)))
///     .build()
///     .unwrap();
/// ```
pub struct InvoiceBuilder {
    concept: Concept,
    doc_type: DocType,
    doc_number: u64,
    invoice_type: InvoiceType,
    point_of_sale: u32,
    number_from: Option<u64>,
    number_to: Option<u64>,
    issue_date: Option<NaiveDate>,
    total: Decimal,
    non_taxable: Decimal,
    net: Decimal,
    exempt: Decimal,
    vat_total: Decimal,
    tax_total: Decimal,
    due_date: Option<NaiveDate>,
    service_from: Option<NaiveDate>,
    service_to: Option<NaiveDate>,
    currency_id: String,
    currency_rate: Decimal,
    associated: Vec<AssociatedInvoice>,
    taxes: Vec<TaxItem>,
    vat_items: Vec<VatItem>,
}

impl InvoiceBuilder {
    pub fn new(invoice_type: InvoiceType, point_of_sale: u32) -> Self {
        Self {
            concept: Concept::Products,
            doc_type: DocType::ConsumidorFinal,
            doc_number: 0,
            invoice_type,
            point_of_sale,
            number_from: None,
            number_to: None,
            issue_date: None,
            total: Decimal::ZERO,
            non_taxable: Decimal::ZERO,
            net: Decimal::ZERO,
            exempt: Decimal::ZERO,
            vat_total: Decimal::ZERO,
            tax_total: Decimal::ZERO,
            due_date: None,
            service_from: None,
            service_to: None,
            currency_id: "PES".to_string(),
            currency_rate: Decimal::ONE,
            associated: Vec::new(),
            taxes: Vec::new(),
            vat_items: Vec::new(),
        }
    }

    pub fn concept(mut self, concept: Concept) -> Self {
        self.concept = concept;
        self
    }

    /// Receiver identity (document type + number).
    pub fn document(mut self, doc_type: DocType, doc_number: u64) -> Self {
        self.doc_type = doc_type;
        self.doc_number = doc_number;
        self
    }

    /// Single invoice number — sets both ends of the range.
    pub fn number(self, number: u64) -> Self {
        self.number_range(number, number)
    }

    pub fn number_range(mut self, from: u64, to: u64) -> Self {
        self.number_from = Some(from);
        self.number_to = Some(to);
        self
    }

    pub fn issue_date(mut self, date: NaiveDate) -> Self {
        self.issue_date = Some(date);
        self
    }

    pub fn total(mut self, amount: Decimal) -> Self {
        self.total = amount;
        self
    }

    pub fn non_taxable(mut self, amount: Decimal) -> Self {
        self.non_taxable = amount;
        self
    }

    pub fn net(mut self, amount: Decimal) -> Self {
        self.net = amount;
        self
    }

    pub fn exempt(mut self, amount: Decimal) -> Self {
        self.exempt = amount;
        self
    }

    pub fn vat_total(mut self, amount: Decimal) -> Self {
        self.vat_total = amount;
        self
    }

    pub fn tax_total(mut self, amount: Decimal) -> Self {
        self.tax_total = amount;
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn service_period(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.service_from = Some(from);
        self.service_to = Some(to);
        self
    }

    pub fn currency(mut self, id: impl Into<String>, rate: Decimal) -> Self {
        self.currency_id = id.into();
        self.currency_rate = rate;
        self
    }

    pub fn add_associated(mut self, associated: AssociatedInvoice) -> Self {
        self.associated.push(associated);
        self
    }

    pub fn add_tax(mut self, tax: TaxItem) -> Self {
        self.taxes.push(tax);
        self
    }

    pub fn add_vat(mut self, vat: VatItem) -> Self {
        self.vat_items.push(vat);
        self
    }

    /// Build the invoice, checking structural requirements.
    ///
    /// # Errors
    ///
    /// Returns `WsfeError::Builder` when the invoice number or issue date
    /// was never set. Business rules (amount arithmetic, service periods)
    /// are checked separately by [`validate_invoice`](super::validate_invoice).
    pub fn build(self) -> Result<Invoice, WsfeError> {
        let number_from = self
            .number_from
            .ok_or_else(|| WsfeError::Builder("invoice number is required".into()))?;
        let number_to = self
            .number_to
            .ok_or_else(|| WsfeError::Builder("invoice number is required".into()))?;
        let issue_date = self
            .issue_date
            .ok_or_else(|| WsfeError::Builder("issue date is required".into()))?;

        Ok(Invoice {
            concept: self.concept,
            doc_type: self.doc_type,
            doc_number: self.doc_number,
            invoice_type: self.invoice_type,
            point_of_sale: self.point_of_sale,
            number_from,
            number_to,
            issue_date,
            total: self.total,
            non_taxable: self.non_taxable,
            net: self.net,
            exempt: self.exempt,
            vat_total: self.vat_total,
            tax_total: self.tax_total,
            due_date: self.due_date,
            service_from: self.service_from,
            service_to: self.service_to,
            currency_id: self.currency_id,
            currency_rate: self.currency_rate,
            associated: self.associated,
            taxes: self.taxes,
            vat_items: self.vat_items,
        })
    }
}
