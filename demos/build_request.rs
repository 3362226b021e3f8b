//! Print the FECAESolicitar envelope for a sample invoice (no network).
//!
//! Run with: `cargo run --example build_request --features soap`

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use wsfe::core::*;
use wsfe::soap::build_cae_request;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let invoice = InvoiceBuilder::new(InvoiceType::FacturaA, 4001)
        .concept(Concept::Services)
        .document(DocType::Cuit, 20_267_565_393)
        .number_range(11, 11)
        .issue_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .service_period(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )
        .due_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
        .net(dec!(100.00))
        .vat_total(dec!(21.00))
        .total(dec!(121.00))
        .add_vat(VatItem::new(VatRate::Standard21, dec!(100.00), dec!(21.00)))
        .build()?;

    let credentials = Credentials::new("TOKEN", "SIGN", 20_267_565_393);
    println!("{}", build_cae_request(&credentials, &invoice)?);

    Ok(())
}
