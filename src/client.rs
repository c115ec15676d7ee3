//! Client side of the exchange.
//!
//! Connects to the configured server, sends the fixed greeting once,
//! half-closes the write direction, then drains replies until the server
//! closes. Each received chunk is reported independently; with no framing
//! on the wire there is nothing to accumulate into.

use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::error::{ExchangeError, IoOp};
use crate::net::{connect_first, resolve};
use crate::protocol::CLIENT_GREETING;

/// Counters from a completed client run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientSummary {
    /// Greeting bytes sent.
    pub bytes_sent: usize,
    /// Reply chunks received.
    pub replies: usize,
    /// Total reply bytes received.
    pub bytes_received: usize,
}

/// Run the whole exchange against the configured server.
///
/// Ends successfully only when the server closes the connection in an
/// orderly way after the greeting was delivered.
pub fn run(config: &ClientConfig) -> Result<ClientSummary, ExchangeError> {
    let candidates = resolve(&config.host, config.port)?;
    let mut conn = connect_first(&candidates)?;
    info!(peer = %conn.peer(), "connected");

    let bytes_sent = conn.send(CLIENT_GREETING).map_err(|e| ExchangeError::Io {
        op: IoOp::Send,
        source: e,
    })?;
    info!(
        bytes = bytes_sent,
        content = %String::from_utf8_lossy(CLIENT_GREETING),
        "greeting sent"
    );

    conn.finish_sending().map_err(|e| ExchangeError::Io {
        op: IoOp::Shutdown,
        source: e,
    })?;
    debug!("write half closed, draining replies");

    let mut replies = 0;
    let mut bytes_received = 0;
    loop {
        match conn.recv_chunk() {
            Ok(Some(chunk)) => {
                replies += 1;
                bytes_received += chunk.len();
                info!(
                    bytes = chunk.len(),
                    content = %String::from_utf8_lossy(&chunk),
                    "reply received"
                );
            }
            Ok(None) => {
                info!("server closed the connection");
                break;
            }
            Err(e) => {
                return Err(ExchangeError::Io {
                    op: IoOp::Receive,
                    source: e,
                })
            }
        }
    }

    Ok(ClientSummary {
        bytes_sent,
        replies,
        bytes_received,
    })
}
