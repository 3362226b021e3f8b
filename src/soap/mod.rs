//! SOAP 1.1 request generation and response extraction for WSFEv1.
//!
//! The service's envelope shapes are fixed by its WSDL, so requests are
//! generated directly with quick-xml — there is no WSDL introspection.
//! Responses are parsed by local element name, so any namespace prefix
//! the server chooses is accepted.
//!
//! # Example
//!
//! ```ignore
//! use wsfe::soap;
//!
//! let xml = soap::build_cae_request(&credentials, &invoice)?;
//! let response = soap::parse_cae_response(&server_reply)?;
//! assert!(response.approved());
//! ```

mod request;
mod response;
pub(crate) mod xml_utils;

pub use request::{build_cae_request, build_dummy_request};
pub use response::{
    AuthResult, CaeResponse, CodeMessage, ServiceStatus, parse_cae_response, parse_dummy_response,
};
pub use xml_utils::{format_amount, format_date, parse_date};

/// WSFEv1 service namespace.
pub const SERVICE_NS: &str = "http://ar.gov.afip.dif.FEV1/";

/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// SOAPAction header value for an operation.
pub fn soap_action(operation: &str) -> String {
    format!("{SERVICE_NS}{operation}")
}
