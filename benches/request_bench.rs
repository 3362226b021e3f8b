use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use wsfe::core::*;
use wsfe::soap::{build_cae_request, parse_cae_response};

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn sample_invoice() -> Invoice {
    let mut builder = InvoiceBuilder::new(InvoiceType::FacturaA, 4001)
        .concept(Concept::Services)
        .document(DocType::Cuit, 20_267_565_393)
        .number(11)
        .issue_date(test_date())
        .service_period(test_date(), test_date())
        .due_date(test_date())
        .net(dec!(400.00))
        .vat_total(dec!(84.00))
        .tax_total(dec!(4.00))
        .total(dec!(488.00));

    for rate in [VatRate::Standard21, VatRate::Reduced10_5] {
        builder = builder.add_vat(VatItem::new(rate, dec!(200.00), dec!(42.00)));
    }
    for i in 1..=4 {
        builder = builder.add_tax(TaxItem::new(
            TaxKind::Provincial,
            format!("Percepción IIBB {i}"),
            dec!(100.00),
            dec!(1),
            dec!(1.00),
        ));
    }

    builder.build().unwrap()
}

const APPROVED_RESPONSE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <FECAESolicitarResponse xmlns="http://ar.gov.afip.dif.FEV1/">
      <FECAESolicitarResult>
        <FeCabResp>
          <Cuit>20267565393</Cuit>
          <PtoVta>4001</PtoVta>
          <CbteTipo>1</CbteTipo>
          <FchProceso>20240615174512</FchProceso>
          <CantReg>1</CantReg>
          <Resultado>A</Resultado>
          <Reproceso>N</Reproceso>
        </FeCabResp>
        <FeDetResp>
          <FECAEDetResponse>
            <Concepto>2</Concepto>
            <DocTipo>80</DocTipo>
            <DocNro>20267565393</DocNro>
            <CbteDesde>11</CbteDesde>
            <CbteHasta>11</CbteHasta>
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

fn bench_build_request(c: &mut Criterion) {
    let invoice = sample_invoice();
    let credentials = Credentials::new("dG9rZW4=", "c2lnbg==", 20_267_565_393);

    c.bench_function("build_cae_request", |b| {
        b.iter(|| build_cae_request(black_box(&credentials), black_box(&invoice)).unwrap())
    });
}

fn bench_parse_response(c: &mut Criterion) {
    c.bench_function("parse_cae_response", |b| {
        b.iter(|| parse_cae_response(black_box(APPROVED_RESPONSE)).unwrap())
    });
}

criterion_group!(benches, bench_build_request, bench_parse_response);
criterion_main!(benches);
