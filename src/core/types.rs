use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::codes::{Concept, DocType, InvoiceType, TaxKind, VatRate};

/// A WSFEv1 authorization request for a single invoice (CantReg = 1).
///
/// Field names follow the semantic model; the SOAP layer maps them onto
/// the service's element names (`DocTipo`, `CbteDesde`, `ImpTotal`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Concepto — products, services, or both.
    pub concept: Concept,
    /// DocTipo — receiver document type.
    pub doc_type: DocType,
    /// DocNro — receiver document number (0 for consumidor final).
    pub doc_number: u64,
    /// CbteTipo — invoice type.
    pub invoice_type: InvoiceType,
    /// PtoVta — point of sale (1..=99999).
    pub point_of_sale: u32,
    /// CbteDesde — first invoice number covered by the request.
    pub number_from: u64,
    /// CbteHasta — last invoice number covered by the request.
    pub number_to: u64,
    /// CbteFch — issue date.
    pub issue_date: NaiveDate,
    /// ImpTotal — invoice total (sum of the five amounts below).
    pub total: Decimal,
    /// ImpTotConc — net amount not subject to VAT.
    pub non_taxable: Decimal,
    /// ImpNeto — taxed net amount.
    pub net: Decimal,
    /// ImpOpEx — exempt amount.
    pub exempt: Decimal,
    /// ImpIVA — total VAT.
    pub vat_total: Decimal,
    /// ImpTrib — total of other taxes.
    pub tax_total: Decimal,
    /// FchVtoPago — payment due date (required for service concepts).
    pub due_date: Option<NaiveDate>,
    /// FchServDesde — service period start.
    pub service_from: Option<NaiveDate>,
    /// FchServHasta — service period end.
    pub service_to: Option<NaiveDate>,
    /// MonId — currency identifier (e.g. "PES").
    pub currency_id: String,
    /// MonCotiz — exchange rate against the peso (1 for "PES").
    pub currency_rate: Decimal,
    /// CbtesAsoc — invoices this document adjusts (credit/debit notes).
    pub associated: Vec<AssociatedInvoice>,
    /// Tributos — non-VAT tax items.
    pub taxes: Vec<TaxItem>,
    /// Iva — VAT breakdown items.
    pub vat_items: Vec<VatItem>,
}

/// CbteAsoc — reference to a previously authorized invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociatedInvoice {
    /// Tipo — invoice type of the referenced document.
    pub invoice_type: InvoiceType,
    /// PtoVta — point of sale of the referenced document.
    pub point_of_sale: u32,
    /// Nro — number of the referenced document.
    pub number: u64,
}

impl AssociatedInvoice {
    pub fn new(invoice_type: InvoiceType, point_of_sale: u32, number: u64) -> Self {
        Self {
            invoice_type,
            point_of_sale,
            number,
        }
    }
}

/// Tributo — a non-VAT tax line (national, provincial, municipal, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxItem {
    /// Id — tax kind.
    pub kind: TaxKind,
    /// Desc — free-text description.
    pub description: String,
    /// BaseImp — taxable base.
    pub base: Decimal,
    /// Alic — rate percentage.
    pub rate: Decimal,
    /// Importe — tax amount.
    pub amount: Decimal,
}

impl TaxItem {
    pub fn new(
        kind: TaxKind,
        description: impl Into<String>,
        base: Decimal,
        rate: Decimal,
        amount: Decimal,
    ) -> Self {
        Self {
            kind,
            description: description.into(),
            base,
            rate,
            amount,
        }
    }
}

/// AlicIva — one VAT breakdown line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatItem {
    /// Id — VAT rate code.
    pub rate: VatRate,
    /// BaseImp — taxable base.
    pub base: Decimal,
    /// Importe — VAT amount.
    pub amount: Decimal,
}

impl VatItem {
    pub fn new(rate: VatRate, base: Decimal, amount: Decimal) -> Self {
        Self { rate, base, amount }
    }
}

/// Authentication triple passed on every authorization call.
///
/// Token and sign come from a WSAA access ticket (see the `auth` module);
/// the CUIT identifies the issuer the ticket was granted to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// WSAA token, base64 as handed out by the login service.
    pub token: String,
    /// WSAA signature.
    pub sign: String,
    /// CUIT of the represented taxpayer.
    pub cuit: u64,
}

impl Credentials {
    pub fn new(token: impl Into<String>, sign: impl Into<String>, cuit: u64) -> Self {
        Self {
            token: token.into(),
            sign: sign.into(),
            cuit,
        }
    }
}
