//! # wsfe
//!
//! Client for AFIP's WSFEv1 web service — electronic invoicing for Argentina
//! (Factura Electrónica Nacional, RG 2904 option B). Builds the
//! `FECAESolicitar` request document from plain billing fields, submits it,
//! and extracts the CAE (Código de Autorización Electrónico) plus the
//! service's observations, errors and events.
//!
//! All monetary values use [`rust_decimal::Decimal`] — never floating point.
//! Wire formats (element names, `yyyymmdd` dates, decimal amounts) follow the
//! WSFEv1 WSDL contract.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//! use wsfe::core::*;
//!
//! let invoice = InvoiceBuilder::new(InvoiceType::FacturaB, 4001)
//!     .concept(Concept::Products)
//!     .document(DocType::Dni, 28_123_456)
//!     .number(105)
//!     .issue_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
//!     .net(dec!(100.00))
//!     .vat_total(dec!(21.00))
//!     .total(dec!(121.00))
//!     .add_vat(VatItem::new(VatRate::Standard21, dec!(100.00), dec!(21.00)))
//!     .build()
//!     .unwrap();
//!
//! assert!(validate_invoice(&invoice).is_empty());
//! ```
//!
//! Submitting the invoice requires the `client` feature and a valid access
//! ticket obtained from WSAA (see [`auth`]):
//!
//! ```ignore
//! use wsfe::auth::{load_cached_ticket, TICKET_MAX_AGE};
//! use wsfe::client::{Client, Environment};
//!
//! let ticket = load_cached_ticket("TA-wsfe.xml", TICKET_MAX_AGE)?
//!     .expect("run the WSAA login first");
//! let mut client = Client::new(Environment::Testing)?;
//! client.set_credentials(ticket.credentials(20_267_565_393));
//! let auth = client.request_cae(&invoice).await?;
//! println!("CAE: {:?} vence {:?}", auth.cae, auth.cae_due_date);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, AFIP code tables, CUIT check, builder, validation |
//! | `soap` | `FECAESolicitar`/`FEDummy` envelope generation & response parsing |
//! | `auth` | WSAA access ticket (TA) parsing and cached-file loading |
//! | `client` | Async HTTP transport against the WSFEv1 endpoints |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "soap")]
pub mod soap;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "client")]
pub mod client;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
