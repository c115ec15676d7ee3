//! Client binary entry point.
//!
//! Usage:
//!
//! ```bash
//! oneshot-client <HOST> [--port 27015] [--config exchange.toml]
//! ```
//!
//! Connects to the server, sends the fixed greeting, then prints every
//! reply chunk until the server closes. Exits 0 on an orderly exchange
//! and 1 on any failure, including bad arguments.

use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use oneshot_exchange::client;
use oneshot_exchange::config::ClientConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ClientConfig::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(
        host = %config.host,
        port = config.port,
        "Starting oneshot-exchange client"
    );

    match client::run(&config) {
        Ok(summary) => {
            info!(
                bytes_sent = summary.bytes_sent,
                replies = summary.replies,
                bytes_received = summary.bytes_received,
                "Client finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Exchange failed");
            process::exit(1);
        }
    }
}
