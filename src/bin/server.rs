//! Server binary entry point.

use std::process;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use oneshot_exchange::config::ServerConfig;
use oneshot_exchange::server;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = ServerConfig::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(port = config.port, "Starting oneshot-exchange server");

    match server::run(&config) {
        Ok(summary) => {
            info!(
                peer = %summary.peer,
                chunks = summary.chunks_received,
                replies = summary.replies_sent,
                "Server finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Exchange failed");
            process::exit(1);
        }
    }
}
