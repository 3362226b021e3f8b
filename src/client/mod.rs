//! Async HTTP transport against the WSFEv1 endpoints.
//!
//! One call per operation, no retries, no pooling beyond reqwest's own.
//! The client keeps the raw XML of the last exchange for diagnostics.

use std::time::Duration;

use tracing::debug;

use crate::core::{Credentials, Invoice, WsfeError};
use crate::soap::{
    self, CaeResponse, ServiceStatus, build_cae_request, build_dummy_request, parse_cae_response,
    parse_dummy_response,
};

/// Which WSFEv1 deployment to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Homologación — AFIP's test deployment.
    Testing,
    /// Producción.
    Production,
}

impl Environment {
    /// Service endpoint URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Testing => "https://wswhomo.afip.gov.ar/wsfev1/service.asmx",
            Self::Production => "https://servicios1.afip.gov.ar/wsfev1/service.asmx",
        }
    }
}

/// WSFEv1 client.
///
/// ```ignore
/// let mut client = Client::new(Environment::Testing)?;
/// client.set_credentials(ticket.credentials(cuit));
/// let status = client.check_status().await?;
/// let auth = client.request_cae(&invoice).await?;
/// ```
pub struct Client {
    http: reqwest::Client,
    environment: Environment,
    credentials: Option<Credentials>,
    last_request: Option<String>,
    last_response: Option<String>,
}

impl Client {
    /// Create a client for the given environment.
    ///
    /// # Errors
    ///
    /// `WsfeError::Network` if the underlying HTTP client cannot be built.
    pub fn new(environment: Environment) -> Result<Self, WsfeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| WsfeError::Network(e.to_string()))?;
        Ok(Self {
            http,
            environment,
            credentials: None,
            last_request: None,
            last_response: None,
        })
    }

    /// Set the authentication triple used by [`request_cae`](Self::request_cae).
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Raw XML of the last request sent, if any.
    pub fn last_request(&self) -> Option<&str> {
        self.last_request.as_deref()
    }

    /// Raw XML of the last response received, if any.
    pub fn last_response(&self) -> Option<&str> {
        self.last_response.as_deref()
    }

    /// `FEDummy` — check the status of the service's three backends.
    /// Needs no credentials.
    pub async fn check_status(&mut self) -> Result<ServiceStatus, WsfeError> {
        let request = build_dummy_request()?;
        let response = self.call("FEDummy", request).await?;
        parse_dummy_response(&response)
    }

    /// `FECAESolicitar` — submit one invoice for authorization and
    /// extract the CAE response fields.
    ///
    /// # Errors
    ///
    /// `WsfeError::Ticket` when no credentials are set; otherwise the
    /// transport, fault and missing-field errors of the exchange. A
    /// rejected invoice is not an error — check
    /// [`CaeResponse::approved`] and its observations.
    pub async fn request_cae(&mut self, invoice: &Invoice) -> Result<CaeResponse, WsfeError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or_else(|| WsfeError::Ticket("no access ticket credentials set".into()))?;
        let request = build_cae_request(credentials, invoice)?;
        let response = self.call("FECAESolicitar", request).await?;
        parse_cae_response(&response)
    }

    async fn call(&mut self, operation: &str, request: String) -> Result<String, WsfeError> {
        let endpoint = self.environment.endpoint();
        debug!(operation, endpoint, bytes = request.len(), "sending request");

        let resp = self
            .http
            .post(endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", format!("\"{}\"", soap::soap_action(operation)))
            .body(request.clone())
            .send()
            .await
            .map_err(|e| WsfeError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| WsfeError::Network(e.to_string()))?;

        self.last_request = Some(request);
        self.last_response = Some(body.clone());
        debug!(operation, status = %status, bytes = body.len(), "received response");

        // ASMX servers answer SOAP faults with HTTP 500 — let the XML
        // layer turn those into WsfeError::Fault.
        if !status.is_success() && !body.contains("Fault") {
            return Err(WsfeError::Network(format!("HTTP {status}: {body}")));
        }

        Ok(body)
    }
}
