//! Check the WSFEv1 backend status (FEDummy).
//!
//! Run with: `cargo run --example dummy --features client [-- --production]`

use wsfe::client::{Client, Environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let environment = if std::env::args().any(|a| a == "--production") {
        Environment::Production
    } else {
        Environment::Testing
    };

    let mut client = Client::new(environment)?;
    let status = client.check_status().await?;

    println!("endpoint:    {}", environment.endpoint());
    println!("AppServer:   {}", status.app_server);
    println!("DbServer:    {}", status.db_server);
    println!("AuthServer:  {}", status.auth_server);
    println!("all OK:      {}", status.all_ok());

    Ok(())
}
