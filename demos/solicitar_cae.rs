//! Request a CAE for a sample invoice on the homologación environment.
//!
//! Expects a fresh WSAA access ticket in `TA-wsfe.xml` (obtain one with
//! your WSAA login tooling) and the issuer CUIT in the `WSFE_CUIT`
//! environment variable.
//!
//! Run with: `cargo run --example solicitar_cae --features client`

use chrono::Local;
use rust_decimal_macros::dec;
use wsfe::auth::{TICKET_MAX_AGE, load_cached_ticket};
use wsfe::client::{Client, Environment};
use wsfe::core::*;

const TICKET_PATH: &str = "TA-wsfe.xml";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cuit: u64 = std::env::var("WSFE_CUIT")
        .map_err(|_| "set WSFE_CUIT to the issuer CUIT (11 digits)")?
        .parse()?;

    let Some(ticket) = load_cached_ticket(TICKET_PATH, TICKET_MAX_AGE)? else {
        return Err(format!(
            "{TICKET_PATH} is missing or stale — run the WSAA login first"
        )
        .into());
    };

    let today = Local::now().date_naive();
    let invoice = InvoiceBuilder::new(InvoiceType::FacturaB, 4001)
        .concept(Concept::Products)
        .document(DocType::ConsumidorFinal, 0)
        .number(1)
        .issue_date(today)
        .net(dec!(100.00))
        .vat_total(dec!(21.00))
        .tax_total(dec!(1.00))
        .total(dec!(122.00))
        .add_vat(VatItem::new(VatRate::Standard21, dec!(100.00), dec!(21.00)))
        .add_tax(TaxItem::new(
            TaxKind::Municipal,
            "Impuesto municipal",
            dec!(100.00),
            dec!(1),
            dec!(1.00),
        ))
        .build()?;

    for error in validate_invoice(&invoice) {
        println!("validation: {error}");
    }

    let mut client = Client::new(Environment::Testing)?;
    client.set_credentials(ticket.credentials(cuit));

    let auth = client.request_cae(&invoice).await?;

    println!("Resultado:  {:?}", auth.result);
    println!("CAE:        {}", auth.cae.as_deref().unwrap_or("-"));
    if let Some(due) = auth.cae_due_date {
        println!("Vencimiento: {due}");
    }
    if let Some(number) = auth.invoice_number() {
        println!("Comprobante: {number}");
    }
    for obs in &auth.observations {
        println!("Obs {}: {}", obs.code, obs.message);
    }
    for err in &auth.errors {
        println!("Err {}: {}", err.code, err.message);
    }
    for evt in &auth.events {
        println!("Evt {}: {}", evt.code, evt.message);
    }

    Ok(())
}
