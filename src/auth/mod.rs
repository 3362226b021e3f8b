//! WSAA access ticket (TA) handling.
//!
//! Talking to WSFEv1 requires a token/sign pair granted by AFIP's
//! authentication service (WSAA). Acquiring the ticket — building the
//! login request, CMS-signing it with the taxpayer's certificate,
//! calling WSAA — is an external step; this module only covers the
//! consuming side: parsing the `loginTicketResponse` XML and reading
//! it back from a local cache file while it is still fresh.
//!
//! A ticket is valid for several hours, so the usual flow is:
//!
//! ```ignore
//! use wsfe::auth::{load_cached_ticket, save_cached_ticket, TICKET_MAX_AGE};
//!
//! let ticket = match load_cached_ticket("TA-wsfe.xml", TICKET_MAX_AGE)? {
//!     Some(ticket) => ticket,
//!     None => {
//!         let xml = run_external_wsaa_login()?;
//!         save_cached_ticket("TA-wsfe.xml", &xml)?;
//!         parse_ticket(&xml)?
//!     }
//! };
//! let credentials = ticket.credentials(20_267_565_393);
//! ```

use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use chrono::{DateTime, FixedOffset};
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::{Deserialize, Serialize};

use crate::core::{Credentials, WsfeError};
use crate::soap::xml_utils::local_name;

/// Cache freshness window: a ticket file older than this is treated as
/// stale even if its own expiration has not passed.
pub const TICKET_MAX_AGE: Duration = Duration::from_secs(5 * 60 * 60);

/// A parsed WSAA access ticket (`loginTicketResponse`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTicket {
    /// Credentials token (base64).
    pub token: String,
    /// Credentials signature (base64).
    pub sign: String,
    /// Header uniqueId.
    pub unique_id: Option<String>,
    /// Header generationTime.
    pub generation_time: Option<DateTime<FixedOffset>>,
    /// Header expirationTime.
    pub expiration_time: Option<DateTime<FixedOffset>>,
}

impl AccessTicket {
    /// Credentials for the given CUIT.
    pub fn credentials(&self, cuit: u64) -> Credentials {
        Credentials::new(self.token.clone(), self.sign.clone(), cuit)
    }

    /// Whether the ticket's own expirationTime has passed at `now`.
    /// Tickets without an expirationTime are treated as expired.
    pub fn expired(&self, now: DateTime<FixedOffset>) -> bool {
        match self.expiration_time {
            Some(expiration) => expiration <= now,
            None => true,
        }
    }
}

/// Parse a `loginTicketResponse` XML document.
///
/// # Errors
///
/// `WsfeError::Ticket` when the XML is malformed or the credentials
/// (token, sign) are absent.
pub fn parse_ticket(xml: &str) -> Result<AccessTicket, WsfeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut token = None;
    let mut sign = None;
    let mut unique_id = None;
    let mut generation_time = None;
    let mut expiration_time = None;
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(local_name(e.name().as_ref()));
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                match path.last().map(String::as_str) {
                    Some("token") => token = Some(text),
                    Some("sign") => sign = Some(text),
                    Some("uniqueId") => unique_id = Some(text),
                    Some("generationTime") => generation_time = Some(text),
                    Some("expirationTime") => expiration_time = Some(text),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(WsfeError::Ticket(format!("malformed ticket XML: {e}"))),
            _ => {}
        }
    }

    Ok(AccessTicket {
        token: token.ok_or_else(|| WsfeError::Ticket("ticket has no token".into()))?,
        sign: sign.ok_or_else(|| WsfeError::Ticket("ticket has no sign".into()))?,
        unique_id,
        generation_time: generation_time.as_deref().and_then(parse_ticket_time),
        expiration_time: expiration_time.as_deref().and_then(parse_ticket_time),
    })
}

// WSAA timestamps are ISO 8601 with offset, e.g. "2024-06-15T11:01:08.534-03:00"
fn parse_ticket_time(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s.trim()).ok()
}

/// Load the cached ticket from `path` if it exists and is fresh.
///
/// Returns `Ok(None)` when the file is missing or older than `max_age`
/// (the caller should then run the external WSAA login and cache the
/// result). A file that exists but cannot be read or parsed is an error.
pub fn load_cached_ticket(
    path: impl AsRef<Path>,
    max_age: Duration,
) -> Result<Option<AccessTicket>, WsfeError> {
    let path = path.as_ref();
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(WsfeError::Ticket(format!(
                "cannot stat {}: {e}",
                path.display()
            )));
        }
    };

    let mtime = metadata
        .modified()
        .map_err(|e| WsfeError::Ticket(format!("cannot read mtime of {}: {e}", path.display())))?;
    let age = SystemTime::now()
        .duration_since(mtime)
        .unwrap_or(Duration::ZERO);
    if age > max_age {
        return Ok(None);
    }

    let xml = fs::read_to_string(path)
        .map_err(|e| WsfeError::Ticket(format!("cannot read {}: {e}", path.display())))?;
    parse_ticket(&xml).map(Some)
}

/// Cache the raw `loginTicketResponse` handed over by the external
/// WSAA login step.
pub fn save_cached_ticket(path: impl AsRef<Path>, xml: &str) -> Result<(), WsfeError> {
    let path = path.as_ref();
    fs::write(path, xml)
        .map_err(|e| WsfeError::Ticket(format!("cannot write {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICKET_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<loginTicketResponse version="1.0">
  <header>
    <source>CN=wsaahomo, O=AFIP, C=AR</source>
    <destination>SERIALNUMBER=CUIT 20267565393</destination>
    <uniqueId>383953094</uniqueId>
    <generationTime>2024-06-15T11:01:08.534-03:00</generationTime>
    <expirationTime>2024-06-15T23:01:08.534-03:00</expirationTime>
  </header>
  <credentials>
    <token>PD94bWwgdmVyc2lvbj0iMS4wIg==</token>
    <sign>i9xDN4Z0YQ==</sign>
  </credentials>
</loginTicketResponse>"#;

    #[test]
    fn parses_full_ticket() {
        let ticket = parse_ticket(TICKET_XML).unwrap();
        assert_eq!(ticket.token, "PD94bWwgdmVyc2lvbj0iMS4wIg==");
        assert_eq!(ticket.sign, "i9xDN4Z0YQ==");
        assert_eq!(ticket.unique_id.as_deref(), Some("383953094"));
        assert!(ticket.generation_time.is_some());
        assert!(ticket.expiration_time.is_some());
    }

    #[test]
    fn expiry_check() {
        let ticket = parse_ticket(TICKET_XML).unwrap();
        let before = DateTime::parse_from_rfc3339("2024-06-15T12:00:00-03:00").unwrap();
        let after = DateTime::parse_from_rfc3339("2024-06-16T00:00:00-03:00").unwrap();
        assert!(!ticket.expired(before));
        assert!(ticket.expired(after));
    }

    #[test]
    fn missing_sign_is_error() {
        let xml = "<loginTicketResponse><credentials><token>t</token></credentials></loginTicketResponse>";
        assert!(matches!(parse_ticket(xml), Err(WsfeError::Ticket(_))));
    }

    #[test]
    fn credentials_carry_cuit() {
        let ticket = parse_ticket(TICKET_XML).unwrap();
        let creds = ticket.credentials(20_267_565_393);
        assert_eq!(creds.cuit, 20_267_565_393);
        assert_eq!(creds.token, ticket.token);
    }
}
