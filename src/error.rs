//! Errors for the connection lifecycle.
//!
//! One enum covers the failure points of both endpoints: name lookup,
//! establishing the connection, and the I/O calls on an established one.
//! Every variant is fatal. The owning binary prints the error once and
//! exits with status 1; the socket itself is released by drop on the way
//! out, so no variant carries cleanup obligations.

use std::io;
use std::net::SocketAddr;

/// Which I/O call failed on an established connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    /// Writing payload bytes to the peer.
    Send,
    /// Reading a chunk from the peer.
    Receive,
    /// Half-closing the write direction.
    Shutdown,
}

impl std::fmt::Display for IoOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IoOp::Send => write!(f, "send"),
            IoOp::Receive => write!(f, "receive"),
            IoOp::Shutdown => write!(f, "shutdown"),
        }
    }
}

/// Why an exchange failed.
#[derive(Debug)]
pub enum ExchangeError {
    /// Hostname/service lookup failed or produced no candidate addresses.
    Resolution {
        host: String,
        port: u16,
        source: io::Error,
    },
    /// Every resolved candidate was unreachable or refused the connection.
    Connect {
        /// How many candidates were attempted.
        candidates: usize,
        /// The error from the last attempt, if any candidate was tried.
        last: Option<io::Error>,
    },
    /// Could not create or bind the listening socket.
    Bind {
        addr: SocketAddr,
        source: io::Error,
    },
    /// The bound socket could not enter the listening state.
    Listen {
        addr: SocketAddr,
        source: io::Error,
    },
    /// Accepting the single client failed.
    Accept { source: io::Error },
    /// A read, write, or shutdown call failed after the connection was
    /// established.
    Io { op: IoOp, source: io::Error },
}

impl std::fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeError::Resolution { host, port, source } => {
                write!(f, "failed to resolve '{host}:{port}': {source}")
            }
            ExchangeError::Connect { candidates, last } => {
                write!(f, "unable to connect to server ({candidates} candidates tried)")?;
                if let Some(e) = last {
                    write!(f, ": {e}")?;
                }
                Ok(())
            }
            ExchangeError::Bind { addr, source } => {
                write!(f, "bind failed on {addr}: {source}")
            }
            ExchangeError::Listen { addr, source } => {
                write!(f, "listen failed on {addr}: {source}")
            }
            ExchangeError::Accept { source } => {
                write!(f, "accept failed: {source}")
            }
            ExchangeError::Io { op, source } => {
                write!(f, "{op} failed: {source}")
            }
        }
    }
}

impl std::error::Error for ExchangeError {}
