#![cfg(feature = "auth")]

//! Cached ticket loading against real files.

use std::path::PathBuf;
use std::time::Duration;

use wsfe::auth::{TICKET_MAX_AGE, load_cached_ticket, save_cached_ticket};
use wsfe::core::WsfeError;

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

fn scratch_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("wsfe-ticket-{}-{name}.xml", std::process::id()));
    path
}

#[test]
fn missing_file_is_none() {
    let path = scratch_path("missing");
    assert!(
        load_cached_ticket(&path, TICKET_MAX_AGE)
            .unwrap()
            .is_none()
    );
}

#[test]
fn fresh_file_round_trips() {
    let path = scratch_path("fresh");
    save_cached_ticket(&path, TICKET_XML).unwrap();
    let ticket = load_cached_ticket(&path, TICKET_MAX_AGE)
        .unwrap()
        .expect("just-written ticket is fresh");
    assert_eq!(ticket.sign, "i9xDN4Z0YQ==");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn zero_window_treats_file_as_stale() {
    let path = scratch_path("stale");
    save_cached_ticket(&path, TICKET_XML).unwrap();
    std::thread::sleep(Duration::from_millis(20));
    // Any real file is older than a zero-length window
    assert!(
        load_cached_ticket(&path, Duration::ZERO)
            .unwrap()
            .is_none()
    );
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn garbage_file_is_error() {
    let path = scratch_path("garbage");
    save_cached_ticket(&path, "<loginTicketResponse><credentials/></loginTicketResponse>").unwrap();
    assert!(matches!(
        load_cached_ticket(&path, TICKET_MAX_AGE),
        Err(WsfeError::Ticket(_))
    ));
    std::fs::remove_file(&path).unwrap();
}
