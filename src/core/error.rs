use thiserror::Error;

/// Errors that can occur while building, encoding or submitting an
/// authorization request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum WsfeError {
    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// One or more local validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// XML generation or parsing error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Access ticket (TA) could not be loaded or parsed.
    #[error("access ticket error: {0}")]
    Ticket(String),

    /// Network or HTTP error talking to the service.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a SOAP fault.
    #[error("SOAP fault {code}: {reason}")]
    Fault {
        /// `faultcode` value (e.g. "soap:Server").
        code: String,
        /// `faultstring` value.
        reason: String,
    },

    /// An expected field was absent from the service response.
    #[error("missing response field: {0}")]
    MissingField(&'static str),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "vat_items.0.amount").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
