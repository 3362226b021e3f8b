//! Extraction of `FECAESolicitarResult` and `FEDummyResult` fields.

use chrono::NaiveDate;
use quick_xml::Reader;
use quick_xml::events::Event;
use serde::{Deserialize, Serialize};

use crate::core::WsfeError;

use super::xml_utils::{local_name, parse_date};

/// Resultado — outcome of an authorization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthResult {
    /// A — approved.
    Approved,
    /// R — rejected.
    Rejected,
    /// P — partially approved.
    Partial,
}

impl AuthResult {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Approved => "A",
            Self::Rejected => "R",
            Self::Partial => "P",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "A" => Some(Self::Approved),
            "R" => Some(Self::Rejected),
            "P" => Some(Self::Partial),
            _ => None,
        }
    }
}

/// A coded message from the service (observation, error or event).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMessage {
    pub code: i64,
    pub message: String,
}

/// Parsed `FECAESolicitarResult`.
///
/// `cae` is `None` on rejection — consult `observations` and `errors`
/// for the reasons the service gives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaeResponse {
    /// Header Resultado (A/R/P).
    pub result: AuthResult,
    /// Reproceso flag from the header, when present.
    pub reprocess: Option<bool>,
    /// FchProceso — processing timestamp as sent by the service.
    pub process_date: Option<String>,
    /// Per-detail Resultado.
    pub detail_result: Option<AuthResult>,
    /// CAE — the authorization code.
    pub cae: Option<String>,
    /// CAEFchVto — expiry date of the CAE.
    pub cae_due_date: Option<NaiveDate>,
    /// CbteDesde echoed back by the service.
    pub number_from: Option<u64>,
    /// CbteHasta echoed back by the service.
    pub number_to: Option<u64>,
    /// CbteFch echoed back by the service.
    pub issue_date: Option<NaiveDate>,
    /// Observaciones attached to the detail.
    pub observations: Vec<CodeMessage>,
    /// Service-level Errors.
    pub errors: Vec<CodeMessage>,
    /// Service-level Events.
    pub events: Vec<CodeMessage>,
}

impl CaeResponse {
    /// Whether the request was approved.
    pub fn approved(&self) -> bool {
        self.result == AuthResult::Approved
    }

    /// The authorized invoice number (start of the echoed range).
    pub fn invoice_number(&self) -> Option<u64> {
        self.number_from
    }
}

/// Parsed `FEDummyResult` — status of the three service backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub app_server: String,
    pub db_server: String,
    pub auth_server: String,
}

impl ServiceStatus {
    /// True when all three backends report "OK".
    pub fn all_ok(&self) -> bool {
        [&self.app_server, &self.db_server, &self.auth_server]
            .iter()
            .all(|s| s.eq_ignore_ascii_case("OK"))
    }
}

#[derive(Default)]
struct ParsedFault {
    code: Option<String>,
    reason: Option<String>,
}

#[derive(Default)]
struct ParsedCae {
    saw_result: bool,
    header_result: Option<String>,
    reprocess: Option<String>,
    process_date: Option<String>,
    detail_done: bool,
    detail_result: Option<String>,
    cae: Option<String>,
    cae_due_date: Option<String>,
    number_from: Option<String>,
    number_to: Option<String>,
    issue_date: Option<String>,
    current_code: Option<String>,
    current_msg: Option<String>,
    observations: Vec<CodeMessage>,
    errors: Vec<CodeMessage>,
    events: Vec<CodeMessage>,
    fault: Option<ParsedFault>,
}

impl ParsedCae {
    fn handle_text(&mut self, path: &[String], text: &str) {
        let Some(last) = path.last() else { return };
        let in_header = path.iter().any(|p| p == "FeCabResp");
        let in_detail = path.iter().any(|p| p == "FECAEDetResponse") && !self.detail_done;

        match last.as_str() {
            "Resultado" if in_header => self.header_result = Some(text.to_string()),
            "Resultado" if in_detail => self.detail_result = Some(text.to_string()),
            "Reproceso" if in_header => self.reprocess = Some(text.to_string()),
            "FchProceso" if in_header => self.process_date = Some(text.to_string()),
            "CAE" if in_detail => self.cae = Some(text.to_string()),
            "CAEFchVto" if in_detail => self.cae_due_date = Some(text.to_string()),
            "CbteDesde" if in_detail => self.number_from = Some(text.to_string()),
            "CbteHasta" if in_detail => self.number_to = Some(text.to_string()),
            "CbteFch" if in_detail => self.issue_date = Some(text.to_string()),
            "Code" => self.current_code = Some(text.to_string()),
            "Msg" => self.current_msg = Some(text.to_string()),
            "faultcode" => {
                self.fault.get_or_insert_with(ParsedFault::default).code = Some(text.to_string());
            }
            "faultstring" => {
                self.fault.get_or_insert_with(ParsedFault::default).reason = Some(text.to_string());
            }
            _ => {}
        }
    }

    fn take_code_message(&mut self) -> Option<CodeMessage> {
        let message = self.current_msg.take().unwrap_or_default();
        let code = self
            .current_code
            .take()
            .and_then(|c| c.trim().parse().ok())
            .unwrap_or(0);
        if message.is_empty() && code == 0 {
            None
        } else {
            Some(CodeMessage { code, message })
        }
    }

    fn into_response(self) -> Result<CaeResponse, WsfeError> {
        if let Some(fault) = self.fault {
            return Err(WsfeError::Fault {
                code: fault.code.unwrap_or_default(),
                reason: fault.reason.unwrap_or_default(),
            });
        }
        if !self.saw_result {
            return Err(WsfeError::MissingField("FECAESolicitarResult"));
        }
        let result = self
            .header_result
            .as_deref()
            .and_then(AuthResult::from_code)
            .ok_or(WsfeError::MissingField("FeCabResp.Resultado"))?;

        Ok(CaeResponse {
            result,
            reprocess: self.reprocess.as_deref().map(|s| s.trim() == "S"),
            process_date: self.process_date,
            detail_result: self.detail_result.as_deref().and_then(AuthResult::from_code),
            cae: self.cae.filter(|c| !c.trim().is_empty()),
            cae_due_date: self.cae_due_date.as_deref().and_then(parse_date),
            number_from: self.number_from.and_then(|s| s.trim().parse().ok()),
            number_to: self.number_to.and_then(|s| s.trim().parse().ok()),
            issue_date: self.issue_date.as_deref().and_then(parse_date),
            observations: self.observations,
            errors: self.errors,
            events: self.events,
        })
    }
}

/// Parse a `FECAESolicitar` SOAP response.
///
/// A SOAP fault becomes `WsfeError::Fault`; a response without the result
/// element or the header Resultado is the missing-field error. Only the
/// first `FECAEDetResponse` is extracted (requests carry CantReg = 1).
pub fn parse_cae_response(xml: &str) -> Result<CaeResponse, WsfeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut parsed = ParsedCae::default();
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e.name().as_ref());
                if name == "FECAESolicitarResult" {
                    parsed.saw_result = true;
                }
                path.push(name);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                if !text.is_empty() {
                    parsed.handle_text(&path, &text);
                }
            }
            Ok(Event::End(_)) => {
                let ended = path.pop().unwrap_or_default();
                match ended.as_str() {
                    "Obs" => {
                        if let Some(cm) = parsed.take_code_message() {
                            parsed.observations.push(cm);
                        }
                    }
                    "Err" => {
                        if let Some(cm) = parsed.take_code_message() {
                            parsed.errors.push(cm);
                        }
                    }
                    "Evt" => {
                        if let Some(cm) = parsed.take_code_message() {
                            parsed.events.push(cm);
                        }
                    }
                    "FECAEDetResponse" => parsed.detail_done = true,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(WsfeError::Xml(format!("XML parse error: {e}"))),
            _ => {}
        }
    }

    parsed.into_response()
}

/// Parse a `FEDummy` SOAP response into the backend status triple.
pub fn parse_dummy_response(xml: &str) -> Result<ServiceStatus, WsfeError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut app_server = None;
    let mut db_server = None;
    let mut auth_server = None;
    let mut fault = ParsedFault::default();
    let mut saw_fault = false;
    let mut path: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = local_name(e.name().as_ref());
                if name == "Fault" {
                    saw_fault = true;
                }
                path.push(name);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                match path.last().map(String::as_str) {
                    Some("AppServer") => app_server = Some(text),
                    Some("DbServer") => db_server = Some(text),
                    Some("AuthServer") => auth_server = Some(text),
                    Some("faultcode") => fault.code = Some(text),
                    Some("faultstring") => fault.reason = Some(text),
                    _ => {}
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(WsfeError::Xml(format!("XML parse error: {e}"))),
            _ => {}
        }
    }

    if saw_fault {
        return Err(WsfeError::Fault {
            code: fault.code.unwrap_or_default(),
            reason: fault.reason.unwrap_or_default(),
        });
    }

    Ok(ServiceStatus {
        app_server: app_server.ok_or(WsfeError::MissingField("AppServer"))?,
        db_server: db_server.ok_or(WsfeError::MissingField("DbServer"))?,
        auth_server: auth_server.ok_or(WsfeError::MissingField("AuthServer"))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_result_codes() {
        assert_eq!(AuthResult::from_code("A"), Some(AuthResult::Approved));
        assert_eq!(AuthResult::from_code(" R "), Some(AuthResult::Rejected));
        assert_eq!(AuthResult::from_code("X"), None);
        assert_eq!(AuthResult::Partial.code(), "P");
    }
}
