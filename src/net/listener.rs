//! Passive endpoint construction and the single accept.
//!
//! The socket is built in explicit steps (create, bind, listen) so bind
//! failures and listen failures stay distinct. The listener is consumed
//! by the accept: once one client is in, the passive endpoint is gone and
//! no second client can ever be accepted in the same run.

use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, SocketAddr, TcpListener};
use tracing::debug;

use crate::error::ExchangeError;
use crate::net::Connection;

/// Listen backlog. Only one connection is ever accepted, so queue depth is
/// immaterial; this matches the std library's own default.
const BACKLOG: i32 = 128;

/// Build a listening socket on the wildcard IPv4 address.
pub fn bind_any(port: u16) -> Result<TcpListener, ExchangeError> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));

    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))
        .map_err(|e| ExchangeError::Bind { addr, source: e })?;

    // Allow rebinding the fixed port while a previous run's socket is
    // still in TIME_WAIT.
    socket
        .set_reuse_address(true)
        .map_err(|e| ExchangeError::Bind { addr, source: e })?;
    socket
        .bind(&addr.into())
        .map_err(|e| ExchangeError::Bind { addr, source: e })?;
    socket
        .listen(BACKLOG)
        .map_err(|e| ExchangeError::Listen { addr, source: e })?;

    Ok(socket.into())
}

/// Block until exactly one client connects, then drop the listener.
pub fn accept_one(listener: TcpListener) -> Result<Connection, ExchangeError> {
    let (stream, peer) = listener
        .accept()
        .map_err(|e| ExchangeError::Accept { source: e })?;
    drop(listener);
    debug!(peer = %peer, "listener closed after single accept");
    Ok(Connection::new(stream, peer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpStream;
    use std::thread;

    #[test]
    fn test_bind_any_assigns_port() {
        let listener = bind_any(0).unwrap();
        let addr = listener.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
        assert_eq!(addr.ip(), Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn test_bind_conflict_reported_as_bind_error() {
        let first = bind_any(0).unwrap();
        let port = first.local_addr().unwrap().port();

        match bind_any(port) {
            Err(ExchangeError::Bind { addr, .. }) => assert_eq!(addr.port(), port),
            other => panic!("unexpected: {:?}", other.map(|l| l.local_addr())),
        }
    }

    #[test]
    fn test_accept_one_closes_listener() {
        let listener = bind_any(0).unwrap();
        let port = listener.local_addr().unwrap().port();

        let first = thread::spawn(move || TcpStream::connect(("127.0.0.1", port)));

        let conn = accept_one(listener).unwrap();
        assert!(conn.peer().ip().is_loopback());
        first.join().unwrap().unwrap();

        // The passive endpoint is gone, so a second client is refused.
        assert!(TcpStream::connect(("127.0.0.1", port)).is_err());
    }
}
