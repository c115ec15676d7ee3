//! Server side of the exchange.
//!
//! Binds the configured port, accepts exactly one client, and
//! acknowledges every chunk that client sends. Once the client signals
//! end-of-output the server half-closes its own write direction and
//! finishes. One connection per process lifetime; the listener is gone
//! before the exchange even starts.

use std::net::{SocketAddr, TcpListener};

use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::error::{ExchangeError, IoOp};
use crate::net::{accept_one, bind_any};
use crate::protocol::SERVER_ACK;

/// Counters from a completed server run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerSummary {
    /// Address of the one client served.
    pub peer: SocketAddr,
    /// Chunks received from the client.
    pub chunks_received: usize,
    /// Total payload bytes received.
    pub bytes_received: usize,
    /// Acknowledgments sent back.
    pub replies_sent: usize,
}

/// Bind the configured port and serve the single client.
pub fn run(config: &ServerConfig) -> Result<ServerSummary, ExchangeError> {
    let listener = bind_any(config.port)?;
    info!(port = config.port, "listening");
    serve_on(listener)
}

/// Serve exactly one client on an already-bound listener.
///
/// Split out from [`run`] so tests can hand in a listener on an
/// OS-assigned port.
pub fn serve_on(listener: TcpListener) -> Result<ServerSummary, ExchangeError> {
    let mut conn = accept_one(listener)?;
    info!(peer = %conn.peer(), "client connected");

    let mut chunks_received = 0;
    let mut bytes_received = 0;
    let mut replies_sent = 0;

    loop {
        match conn.recv_chunk() {
            Ok(Some(chunk)) => {
                chunks_received += 1;
                bytes_received += chunk.len();
                info!(
                    bytes = chunk.len(),
                    content = %String::from_utf8_lossy(&chunk),
                    "chunk received"
                );

                let sent = conn.send(SERVER_ACK).map_err(|e| ExchangeError::Io {
                    op: IoOp::Send,
                    source: e,
                })?;
                replies_sent += 1;
                debug!(bytes = sent, "acknowledgment sent");
            }
            Ok(None) => {
                info!("client finished sending");
                break;
            }
            // No orderly shutdown on this path; dropping the connection
            // releases the socket as-is.
            Err(e) => {
                return Err(ExchangeError::Io {
                    op: IoOp::Receive,
                    source: e,
                })
            }
        }
    }

    conn.finish_sending().map_err(|e| ExchangeError::Io {
        op: IoOp::Shutdown,
        source: e,
    })?;
    info!(
        peer = %conn.peer(),
        chunks = chunks_received,
        replies = replies_sent,
        "exchange complete"
    );

    Ok(ServerSummary {
        peer: conn.peer(),
        chunks_received,
        bytes_received,
        replies_sent,
    })
}
