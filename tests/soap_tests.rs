#![cfg(feature = "soap")]

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use wsfe::core::*;
use wsfe::soap::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn credentials() -> Credentials {
    Credentials::new("dG9rZW4=", "c2lnbg==", 20_267_565_393)
}

fn products_invoice() -> Invoice {
    InvoiceBuilder::new(InvoiceType::FacturaB, 4001)
        .concept(Concept::Products)
        .document(DocType::Dni, 28_123_456)
        .number(105)
        .issue_date(date(2024, 6, 15))
        .net(dec!(100.00))
        .vat_total(dec!(21.00))
        .total(dec!(121.00))
        .add_vat(VatItem::new(VatRate::Standard21, dec!(100.00), dec!(21.00)))
        .build()
        .unwrap()
}

fn services_invoice() -> Invoice {
    InvoiceBuilder::new(InvoiceType::FacturaA, 4001)
        .concept(Concept::Services)
        .document(DocType::Cuit, 20_267_565_393)
        .number_range(11, 11)
        .issue_date(date(2024, 6, 15))
        .service_period(date(2024, 6, 1), date(2024, 6, 30))
        .due_date(date(2024, 7, 15))
        .net(dec!(100.00))
        .vat_total(dec!(21.00))
        .tax_total(dec!(1.00))
        .total(dec!(122.00))
        .add_vat(VatItem::new(VatRate::Standard21, dec!(100.00), dec!(21.00)))
        .add_tax(TaxItem::new(
            TaxKind::Municipal,
            "Imp. municipal Matanza",
            dec!(100.00),
            dec!(1),
            dec!(1.00),
        ))
        .build()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Request generation — the assembled document carries exactly the input
// fields under the service's element names
// ---------------------------------------------------------------------------

#[test]
fn cae_request_carries_auth() {
    let xml = build_cae_request(&credentials(), &products_invoice()).unwrap();
    assert!(xml.contains("<ar:Token>dG9rZW4=</ar:Token>"));
    assert!(xml.contains("<ar:Sign>c2lnbg==</ar:Sign>"));
    assert!(xml.contains("<ar:Cuit>20267565393</ar:Cuit>"));
}

#[test]
fn cae_request_header_is_single_register() {
    let xml = build_cae_request(&credentials(), &products_invoice()).unwrap();
    assert!(xml.contains("<ar:CantReg>1</ar:CantReg>"));
    assert!(xml.contains("<ar:PtoVta>4001</ar:PtoVta>"));
    assert!(xml.contains("<ar:CbteTipo>6</ar:CbteTipo>"));
}

#[test]
fn cae_request_detail_fields() {
    let xml = build_cae_request(&credentials(), &products_invoice()).unwrap();
    assert!(xml.contains("<ar:Concepto>1</ar:Concepto>"));
    assert!(xml.contains("<ar:DocTipo>96</ar:DocTipo>"));
    assert!(xml.contains("<ar:DocNro>28123456</ar:DocNro>"));
    assert!(xml.contains("<ar:CbteDesde>105</ar:CbteDesde>"));
    assert!(xml.contains("<ar:CbteHasta>105</ar:CbteHasta>"));
    assert!(xml.contains("<ar:CbteFch>20240615</ar:CbteFch>"));
    assert!(xml.contains("<ar:ImpTotal>121.00</ar:ImpTotal>"));
    assert!(xml.contains("<ar:ImpTotConc>0.00</ar:ImpTotConc>"));
    assert!(xml.contains("<ar:ImpNeto>100.00</ar:ImpNeto>"));
    assert!(xml.contains("<ar:ImpOpEx>0.00</ar:ImpOpEx>"));
    assert!(xml.contains("<ar:ImpTrib>0.00</ar:ImpTrib>"));
    assert!(xml.contains("<ar:ImpIVA>21.00</ar:ImpIVA>"));
    assert!(xml.contains("<ar:MonId>PES</ar:MonId>"));
    assert!(xml.contains("<ar:MonCotiz>1.00</ar:MonCotiz>"));
}

#[test]
fn cae_request_omits_absent_dates_and_empty_collections() {
    let xml = build_cae_request(&credentials(), &products_invoice()).unwrap();
    assert!(!xml.contains("FchServDesde"));
    assert!(!xml.contains("FchServHasta"));
    assert!(!xml.contains("FchVtoPago"));
    assert!(!xml.contains("CbtesAsoc"));
    assert!(!xml.contains("Tributos"));
}

#[test]
fn cae_request_service_dates_present() {
    let xml = build_cae_request(&credentials(), &services_invoice()).unwrap();
    assert!(xml.contains("<ar:FchServDesde>20240601</ar:FchServDesde>"));
    assert!(xml.contains("<ar:FchServHasta>20240630</ar:FchServHasta>"));
    assert!(xml.contains("<ar:FchVtoPago>20240715</ar:FchVtoPago>"));
}

#[test]
fn cae_request_renders_tax_items() {
    let xml = build_cae_request(&credentials(), &services_invoice()).unwrap();
    assert!(xml.contains("<ar:Tributo>"));
    assert!(xml.contains("<ar:Desc>Imp. municipal Matanza</ar:Desc>"));
    assert!(xml.contains("<ar:BaseImp>100.00</ar:BaseImp>"));
    assert!(xml.contains("<ar:Alic>1.00</ar:Alic>"));
}

#[test]
fn cae_request_renders_vat_items() {
    let xml = build_cae_request(&credentials(), &services_invoice()).unwrap();
    assert!(xml.contains("<ar:AlicIva>"));
    assert!(xml.contains("<ar:Id>5</ar:Id>"));
    assert!(xml.contains("<ar:Importe>21.00</ar:Importe>"));
}

#[test]
fn cae_request_renders_associated_invoices() {
    let invoice = InvoiceBuilder::new(InvoiceType::NotaCreditoB, 2)
        .number(7)
        .issue_date(date(2024, 6, 15))
        .add_associated(AssociatedInvoice::new(InvoiceType::FacturaB, 2, 1234))
        .build()
        .unwrap();
    let xml = build_cae_request(&credentials(), &invoice).unwrap();
    assert!(xml.contains("<ar:CbteAsoc>"));
    assert!(xml.contains("<ar:Tipo>6</ar:Tipo>"));
    assert!(xml.contains("<ar:Nro>1234</ar:Nro>"));
}

#[test]
fn cae_request_escapes_text() {
    let invoice = InvoiceBuilder::new(InvoiceType::FacturaA, 1)
        .number(1)
        .issue_date(date(2024, 6, 15))
        .tax_total(dec!(1.00))
        .total(dec!(1.00))
        .add_tax(TaxItem::new(
            TaxKind::Other,
            "Perfumería & Cía <SA>",
            dec!(10.00),
            dec!(10),
            dec!(1.00),
        ))
        .build()
        .unwrap();
    let xml = build_cae_request(&credentials(), &invoice).unwrap();
    assert!(xml.contains("Perfumería &amp; Cía &lt;SA&gt;"));
}

#[test]
fn dummy_request_has_no_auth() {
    let xml = build_dummy_request().unwrap();
    assert!(xml.contains("<ar:FEDummy/>"));
    assert!(!xml.contains("Auth"));
}

#[test]
fn soap_action_urls() {
    assert_eq!(
        soap_action("FECAESolicitar"),
        "http://ar.gov.afip.dif.FEV1/FECAESolicitar"
    );
}

// ---------------------------------------------------------------------------
// Response extraction
// ---------------------------------------------------------------------------

const APPROVED_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <FECAESolicitarResponse xmlns="http://ar.gov.afip.dif.FEV1/">
      <FECAESolicitarResult>
        <FeCabResp>
          <Cuit>20267565393</Cuit>
          <PtoVta>4001</PtoVta>
          <CbteTipo>6</CbteTipo>
          <FchProceso>20240615174512</FchProceso>
          <CantReg>1</CantReg>
          <Resultado>A</Resultado>
          <Reproceso>N</Reproceso>
        </FeCabResp>
        <FeDetResp>
          <FECAEDetResponse>
            <Concepto>1</Concepto>
            <DocTipo>96</DocTipo>
            <DocNro>28123456</DocNro>
            <CbteDesde>105</CbteDesde>
            <CbteHasta>105</CbteHasta>
            <CbteFch>20240615</CbteFch>
            <Resultado>A</Resultado>
            <CAE>74238090123456</CAE>
            <CAEFchVto>20240625</CAEFchVto>
          </FECAEDetResponse>
        </FeDetResp>
      </FECAESolicitarResult>
    </FECAESolicitarResponse>
  </soap:Body>
</soap:Envelope>"#;

const REJECTED_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <FECAESolicitarResponse xmlns="http://ar.gov.afip.dif.FEV1/">
      <FECAESolicitarResult>
        <FeCabResp>
          <Cuit>20267565393</Cuit>
          <PtoVta>4001</PtoVta>
          <CbteTipo>6</CbteTipo>
          <FchProceso>20240615174512</FchProceso>
          <CantReg>1</CantReg>
          <Resultado>R</Resultado>
          <Reproceso>N</Reproceso>
        </FeCabResp>
        <FeDetResp>
          <FECAEDetResponse>
            <Concepto>1</Concepto>
            <DocTipo>96</DocTipo>
            <DocNro>28123456</DocNro>
            <CbteDesde>105</CbteDesde>
            <CbteHasta>105</CbteHasta>
            <CbteFch>20240615</CbteFch>
            <Resultado>R</Resultado>
            <Observaciones>
              <Obs>
                <Code>10048</Code>
                <Msg>El campo CbteDesde es menor al proximo numero habilitado</Msg>
              </Obs>
              <Obs>
                <Code>10018</Code>
                <Msg>Si DocTipo es 96 DocNro debe ser mayor a 0</Msg>
              </Obs>
            </Observaciones>
            <CAE />
            <CAEFchVto />
          </FECAEDetResponse>
        </FeDetResp>
        <Events>
          <Evt>
            <Code>10</Code>
            <Msg>Mantenimiento programado del servicio</Msg>
          </Evt>
        </Events>
      </FECAESolicitarResult>
    </FECAESolicitarResponse>
  </soap:Body>
</soap:Envelope>"#;

const ERROR_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <FECAESolicitarResponse xmlns="http://ar.gov.afip.dif.FEV1/">
      <FECAESolicitarResult>
        <FeCabResp>
          <Cuit>20267565393</Cuit>
          <PtoVta>4001</PtoVta>
          <CbteTipo>6</CbteTipo>
          <CantReg>1</CantReg>
          <Resultado>R</Resultado>
        </FeCabResp>
        <Errors>
          <Err>
            <Code>600</Code>
            <Msg>ValidacionDeToken: No apareci&#243; CUIT en lista de relaciones</Msg>
          </Err>
        </Errors>
      </FECAESolicitarResult>
    </FECAESolicitarResponse>
  </soap:Body>
</soap:Envelope>"#;

const FAULT_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>Server was unable to process request.</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

const DUMMY_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <FEDummyResponse xmlns="http://ar.gov.afip.dif.FEV1/">
      <FEDummyResult>
        <AppServer>OK</AppServer>
        <DbServer>OK</DbServer>
        <AuthServer>OK</AuthServer>
      </FEDummyResult>
    </FEDummyResponse>
  </soap:Body>
</soap:Envelope>"#;

#[test]
fn approved_response_extracted() {
    let resp = parse_cae_response(APPROVED_RESPONSE).unwrap();
    assert_eq!(resp.result, AuthResult::Approved);
    assert!(resp.approved());
    assert_eq!(resp.reprocess, Some(false));
    assert_eq!(resp.process_date.as_deref(), Some("20240615174512"));
    assert_eq!(resp.detail_result, Some(AuthResult::Approved));
    assert_eq!(resp.cae.as_deref(), Some("74238090123456"));
    assert_eq!(resp.cae_due_date, Some(date(2024, 6, 25)));
    assert_eq!(resp.invoice_number(), Some(105));
    assert_eq!(resp.number_to, Some(105));
    assert_eq!(resp.issue_date, Some(date(2024, 6, 15)));
    assert!(resp.observations.is_empty());
    assert!(resp.errors.is_empty());
}

#[test]
fn rejected_response_has_no_cae() {
    let resp = parse_cae_response(REJECTED_RESPONSE).unwrap();
    assert_eq!(resp.result, AuthResult::Rejected);
    assert!(!resp.approved());
    assert_eq!(resp.cae, None);
    assert_eq!(resp.cae_due_date, None);
}

#[test]
fn rejected_response_observations() {
    let resp = parse_cae_response(REJECTED_RESPONSE).unwrap();
    assert_eq!(resp.observations.len(), 2);
    assert_eq!(resp.observations[0].code, 10048);
    assert!(resp.observations[0].message.contains("CbteDesde"));
    assert_eq!(resp.observations[1].code, 10018);
    assert_eq!(resp.events.len(), 1);
    assert_eq!(resp.events[0].code, 10);
}

#[test]
fn error_response_extracted() {
    let resp = parse_cae_response(ERROR_RESPONSE).unwrap();
    assert_eq!(resp.result, AuthResult::Rejected);
    assert_eq!(resp.errors.len(), 1);
    assert_eq!(resp.errors[0].code, 600);
    assert!(resp.errors[0].message.contains("ValidacionDeToken"));
    assert!(resp.cae.is_none());
}

#[test]
fn fault_becomes_error() {
    let err = parse_cae_response(FAULT_RESPONSE).unwrap_err();
    match err {
        WsfeError::Fault { code, reason } => {
            assert_eq!(code, "soap:Server");
            assert!(reason.contains("unable to process"));
        }
        other => panic!("expected fault, got {other:?}"),
    }
}

#[test]
fn missing_result_is_missing_field() {
    let xml = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
      <soap:Body><SomethingElse /></soap:Body></soap:Envelope>"#;
    assert!(matches!(
        parse_cae_response(xml),
        Err(WsfeError::MissingField("FECAESolicitarResult"))
    ));
}

#[test]
fn malformed_xml_is_xml_error() {
    assert!(matches!(
        parse_cae_response("<unclosed"),
        Err(WsfeError::Xml(_))
    ));
}

#[test]
fn dummy_response_extracted() {
    let status = parse_dummy_response(DUMMY_RESPONSE).unwrap();
    assert_eq!(status.app_server, "OK");
    assert_eq!(status.db_server, "OK");
    assert_eq!(status.auth_server, "OK");
    assert!(status.all_ok());
}

#[test]
fn dummy_response_down_backend() {
    let xml = DUMMY_RESPONSE.replace("<DbServer>OK</DbServer>", "<DbServer>DOWN</DbServer>");
    let status = parse_dummy_response(&xml).unwrap();
    assert!(!status.all_ok());
}

#[test]
fn dummy_response_missing_field() {
    let xml = DUMMY_RESPONSE.replace("<AuthServer>OK</AuthServer>", "");
    assert!(matches!(
        parse_dummy_response(&xml),
        Err(WsfeError::MissingField("AuthServer"))
    ));
}

#[test]
fn dummy_fault_becomes_error() {
    assert!(matches!(
        parse_dummy_response(FAULT_RESPONSE),
        Err(WsfeError::Fault { .. })
    ));
}

// ---------------------------------------------------------------------------
// Round trip: generated requests stay parseable XML
// ---------------------------------------------------------------------------

#[test]
fn generated_request_is_well_formed() {
    let xml = build_cae_request(&credentials(), &services_invoice()).unwrap();
    let mut reader = quick_xml::Reader::from_str(&xml);
    loop {
        match reader.read_event() {
            Ok(quick_xml::events::Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("generated XML does not parse: {e}"),
        }
    }
}
