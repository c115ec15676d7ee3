//! Hostname resolution and candidate connect fallback.
//!
//! Resolution can return several addresses for one name (IPv4 and IPv6
//! both). Each candidate is attempted in resolver order and the first
//! successful connect wins; only after every candidate has failed does the
//! connect itself count as failed.

use std::io;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use tracing::{debug, warn};

use crate::error::ExchangeError;
use crate::net::Connection;

/// Resolve `host:port` to candidate addresses, in resolver order.
pub fn resolve(host: &str, port: u16) -> Result<Vec<SocketAddr>, ExchangeError> {
    let candidates: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|e| ExchangeError::Resolution {
            host: host.to_string(),
            port,
            source: e,
        })?
        .collect();

    if candidates.is_empty() {
        return Err(ExchangeError::Resolution {
            host: host.to_string(),
            port,
            source: io::Error::new(io::ErrorKind::NotFound, "lookup returned no addresses"),
        });
    }

    debug!(host, port, candidates = candidates.len(), "resolved");
    Ok(candidates)
}

/// Attempt a blocking connect to each candidate in order, stopping at the
/// first success. Unreachable or refusing candidates are discarded; the
/// last failure is kept for the final diagnostic.
pub fn connect_first(candidates: &[SocketAddr]) -> Result<Connection, ExchangeError> {
    let mut last = None;

    for addr in candidates {
        match TcpStream::connect(addr) {
            Ok(stream) => {
                debug!(addr = %addr, "connected");
                return Ok(Connection::new(stream, *addr));
            }
            Err(e) => {
                warn!(addr = %addr, error = %e, "candidate failed, trying next");
                last = Some(e);
            }
        }
    }

    Err(ExchangeError::Connect {
        candidates: candidates.len(),
        last,
    })
}
