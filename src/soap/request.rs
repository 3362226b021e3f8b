//! `FECAESolicitar` and `FEDummy` request envelopes.

use crate::core::{Credentials, Invoice, WsfeError};

use super::xml_utils::{XmlWriter, format_amount, format_date};
use super::{SERVICE_NS, SOAP_ENV_NS};

fn envelope_open(w: &mut XmlWriter) -> Result<(), WsfeError> {
    w.start_element_with_attrs(
        "soapenv:Envelope",
        &[("xmlns:soapenv", SOAP_ENV_NS), ("xmlns:ar", SERVICE_NS)],
    )?;
    w.empty_element("soapenv:Header")?;
    w.start_element("soapenv:Body")?;
    Ok(())
}

fn envelope_close(w: &mut XmlWriter) -> Result<(), WsfeError> {
    w.end_element("soapenv:Body")?;
    w.end_element("soapenv:Envelope")?;
    Ok(())
}

/// Build the `FEDummy` envelope (service status check — no auth element).
pub fn build_dummy_request() -> Result<String, WsfeError> {
    let mut w = XmlWriter::new()?;
    envelope_open(&mut w)?;
    w.empty_element("ar:FEDummy")?;
    envelope_close(&mut w)?;
    w.into_string()
}

/// Build the `FECAESolicitar` envelope for one invoice.
///
/// The element mapping reshapes the flat invoice record into the
/// document the service expects:
///
/// - `Auth{Token, Sign, Cuit}` from the credentials,
/// - `FeCabReq{CantReg, PtoVta, CbteTipo}` — always one register,
/// - one `FECAEDetRequest` carrying the scalar fields and the three
///   sub-collections (`CbtesAsoc`, `Tributos`, `Iva`).
///
/// Optional dates are omitted when absent, as are empty sub-collections.
pub fn build_cae_request(credentials: &Credentials, invoice: &Invoice) -> Result<String, WsfeError> {
    let mut w = XmlWriter::new()?;
    envelope_open(&mut w)?;
    w.start_element("ar:FECAESolicitar")?;

    w.start_element("ar:Auth")?;
    w.text_element("ar:Token", &credentials.token)?;
    w.text_element("ar:Sign", &credentials.sign)?;
    w.text_element("ar:Cuit", &credentials.cuit.to_string())?;
    w.end_element("ar:Auth")?;

    w.start_element("ar:FeCAEReq")?;

    w.start_element("ar:FeCabReq")?;
    w.text_element("ar:CantReg", "1")?;
    w.text_element("ar:PtoVta", &invoice.point_of_sale.to_string())?;
    w.text_element("ar:CbteTipo", &invoice.invoice_type.code().to_string())?;
    w.end_element("ar:FeCabReq")?;

    w.start_element("ar:FeDetReq")?;
    w.start_element("ar:FECAEDetRequest")?;

    w.text_element("ar:Concepto", &invoice.concept.code().to_string())?;
    w.text_element("ar:DocTipo", &invoice.doc_type.code().to_string())?;
    w.text_element("ar:DocNro", &invoice.doc_number.to_string())?;
    w.text_element("ar:CbteDesde", &invoice.number_from.to_string())?;
    w.text_element("ar:CbteHasta", &invoice.number_to.to_string())?;
    w.text_element("ar:CbteFch", &format_date(invoice.issue_date))?;
    w.text_element("ar:ImpTotal", &format_amount(invoice.total))?;
    w.text_element("ar:ImpTotConc", &format_amount(invoice.non_taxable))?;
    w.text_element("ar:ImpNeto", &format_amount(invoice.net))?;
    w.text_element("ar:ImpOpEx", &format_amount(invoice.exempt))?;
    w.text_element("ar:ImpTrib", &format_amount(invoice.tax_total))?;
    w.text_element("ar:ImpIVA", &format_amount(invoice.vat_total))?;
    if let Some(from) = invoice.service_from {
        w.text_element("ar:FchServDesde", &format_date(from))?;
    }
    if let Some(to) = invoice.service_to {
        w.text_element("ar:FchServHasta", &format_date(to))?;
    }
    if let Some(due) = invoice.due_date {
        w.text_element("ar:FchVtoPago", &format_date(due))?;
    }
    w.text_element("ar:MonId", &invoice.currency_id)?;
    w.text_element("ar:MonCotiz", &format_amount(invoice.currency_rate))?;

    if !invoice.associated.is_empty() {
        w.start_element("ar:CbtesAsoc")?;
        for assoc in &invoice.associated {
            w.start_element("ar:CbteAsoc")?;
            w.text_element("ar:Tipo", &assoc.invoice_type.code().to_string())?;
            w.text_element("ar:PtoVta", &assoc.point_of_sale.to_string())?;
            w.text_element("ar:Nro", &assoc.number.to_string())?;
            w.end_element("ar:CbteAsoc")?;
        }
        w.end_element("ar:CbtesAsoc")?;
    }

    if !invoice.taxes.is_empty() {
        w.start_element("ar:Tributos")?;
        for tax in &invoice.taxes {
            w.start_element("ar:Tributo")?;
            w.text_element("ar:Id", &tax.kind.code().to_string())?;
            w.text_element("ar:Desc", &tax.description)?;
            w.text_element("ar:BaseImp", &format_amount(tax.base))?;
            w.text_element("ar:Alic", &format_amount(tax.rate))?;
            w.text_element("ar:Importe", &format_amount(tax.amount))?;
            w.end_element("ar:Tributo")?;
        }
        w.end_element("ar:Tributos")?;
    }

    if !invoice.vat_items.is_empty() {
        w.start_element("ar:Iva")?;
        for vat in &invoice.vat_items {
            w.start_element("ar:AlicIva")?;
            w.text_element("ar:Id", &vat.rate.code().to_string())?;
            w.text_element("ar:BaseImp", &format_amount(vat.base))?;
            w.text_element("ar:Importe", &format_amount(vat.amount))?;
            w.end_element("ar:AlicIva")?;
        }
        w.end_element("ar:Iva")?;
    }

    w.end_element("ar:FECAEDetRequest")?;
    w.end_element("ar:FeDetReq")?;
    w.end_element("ar:FeCAEReq")?;
    w.end_element("ar:FECAESolicitar")?;
    envelope_close(&mut w)?;
    w.into_string()
}
