//! cwmanage - connection check for a ConnectWise Manage site
//!
//! Loads configuration from the environment, verifies the credentials
//! against the API and reports how many tickets match an optional
//! condition expression.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `CW_BASE_URL`, `CW_COMPANY`, `CW_USERNAME`, `CW_PASSWORD`, `CW_CLIENT_ID`
//!
//! # Usage
//!
//! ```bash
//! ./cwmanage
//! ./cwmanage 'closedFlag=false'
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use cwmanage::pagination::parse_count;
use cwmanage::{Config, CwClient, Query};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cwmanage=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("cwmanage v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::debug!(base_url = %config.base_url, "Configuration loaded");

    let client = CwClient::new(&config).context("Failed to create ConnectWise client")?;

    tracing::info!(api_url = %client.api_url(), "Testing connection to ConnectWise...");
    client
        .test_connection()
        .await
        .context("Connection test failed")?;

    let mut query = Query::new();
    if let Some(conditions) = std::env::args().nth(1) {
        query = query.with_conditions(conditions);
    }

    let count = client
        .fetch("service/tickets/count", &query)
        .await
        .context("Failed to count tickets")?
        .as_ref()
        .and_then(parse_count)
        .unwrap_or(0);

    println!("{} tickets", count);

    Ok(())
}
