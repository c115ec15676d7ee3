//! A single established connection.
//!
//! Owns the stream, the peer address captured at connect/accept time, and
//! the fixed-capacity staging buffer reads go through. The write half has
//! explicit state so a half-close cannot be issued twice and nothing can
//! be sent after one. Dropping the connection closes the socket, which is
//! what guarantees release on every exit path.

use bytes::{Bytes, BytesMut};
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};

use crate::protocol::TRANSFER_BUFFER_SIZE;

/// State of the write half of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendState {
    /// Writes are allowed.
    Open,
    /// The write direction has been shut down. The read direction may
    /// still deliver data from the peer.
    Closed,
}

/// One bidirectional byte stream between the two endpoints.
#[derive(Debug)]
pub struct Connection {
    stream: TcpStream,
    peer: SocketAddr,
    send_state: SendState,
    recv_buf: BytesMut,
}

impl Connection {
    /// Wrap an established stream together with its peer address.
    pub fn new(stream: TcpStream, peer: SocketAddr) -> Self {
        Self {
            stream,
            peer,
            send_state: SendState::Open,
            recv_buf: BytesMut::with_capacity(TRANSFER_BUFFER_SIZE),
        }
    }

    /// Address of the peer, captured when the connection was established.
    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    /// Current state of the write half.
    pub fn send_state(&self) -> SendState {
        self.send_state
    }

    /// Read one chunk: whatever bytes the next read call delivers, at most
    /// the transfer buffer capacity.
    ///
    /// Returns `None` when the peer has finished sending (zero-length
    /// read). That signals only that the peer's write half is closed; the
    /// connection may still carry data the other way.
    pub fn recv_chunk(&mut self) -> io::Result<Option<Bytes>> {
        self.recv_buf.resize(TRANSFER_BUFFER_SIZE, 0);
        let n = self.stream.read(&mut self.recv_buf)?;
        if n == 0 {
            self.recv_buf.clear();
            return Ok(None);
        }
        self.recv_buf.truncate(n);
        Ok(Some(self.recv_buf.split().freeze()))
    }

    /// Send a whole payload, looping until every byte is accepted.
    ///
    /// Returns the number of bytes sent, which is always the payload
    /// length on success; a short write never silently truncates.
    pub fn send(&mut self, payload: &[u8]) -> io::Result<usize> {
        if self.send_state == SendState::Closed {
            return Err(send_half_closed());
        }
        self.stream.write_all(payload)?;
        Ok(payload.len())
    }

    /// Half-close: shut down the write direction, leaving the read
    /// direction open.
    ///
    /// Tells the peer no further data will arrive from this side without
    /// tearing down the whole connection.
    pub fn finish_sending(&mut self) -> io::Result<()> {
        if self.send_state == SendState::Closed {
            return Err(send_half_closed());
        }
        self.stream.shutdown(Shutdown::Write)?;
        self.send_state = SendState::Closed;
        Ok(())
    }
}

fn send_half_closed() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "send half already shut down")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    /// Loopback pair of connections: (accepted side, connecting side).
    fn pair() -> (Connection, Connection) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let connector = thread::spawn(move || {
            let stream = TcpStream::connect(addr).unwrap();
            Connection::new(stream, addr)
        });

        let (stream, peer) = listener.accept().unwrap();
        let accepted = Connection::new(stream, peer);
        (accepted, connector.join().unwrap())
    }

    #[test]
    fn test_send_state_transitions() {
        let (_other_end, mut conn) = pair();

        assert_eq!(conn.send_state(), SendState::Open);
        conn.send(b"hello").unwrap();

        conn.finish_sending().unwrap();
        assert_eq!(conn.send_state(), SendState::Closed);

        // Neither sending nor a second half-close is allowed afterwards.
        assert!(conn.send(b"more").is_err());
        assert!(conn.finish_sending().is_err());
    }

    #[test]
    fn test_recv_chunk_then_eof() {
        let (mut server_side, mut client_side) = pair();

        let sent = client_side.send(b"hello there").unwrap();
        assert_eq!(sent, 11);

        let chunk = server_side.recv_chunk().unwrap().unwrap();
        assert_eq!(&chunk[..], b"hello there");

        client_side.finish_sending().unwrap();
        assert!(server_side.recv_chunk().unwrap().is_none());
    }

    #[test]
    fn test_chunks_bounded_by_transfer_buffer() {
        let (mut server_side, mut client_side) = pair();

        // More than one transfer buffer's worth arrives across several
        // chunks, each no larger than the buffer.
        let payload = vec![0x5au8; TRANSFER_BUFFER_SIZE + 200];
        client_side.send(&payload).unwrap();
        client_side.finish_sending().unwrap();

        let mut total = 0;
        while let Some(chunk) = server_side.recv_chunk().unwrap() {
            assert!(chunk.len() <= TRANSFER_BUFFER_SIZE);
            assert!(chunk.iter().all(|&b| b == 0x5a));
            total += chunk.len();
        }
        assert_eq!(total, payload.len());
    }

    #[test]
    fn test_peer_address_captured() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let connector = thread::spawn(move || {
            let stream = TcpStream::connect(addr).unwrap();
            Connection::new(stream, addr)
        });

        let (stream, peer) = listener.accept().unwrap();
        let server_side = Connection::new(stream, peer);
        let client_side = connector.join().unwrap();

        // The connecting side dialed the listener address; the accepted
        // side sees the client's ephemeral loopback endpoint.
        assert_eq!(client_side.peer(), addr);
        assert!(server_side.peer().ip().is_loopback());
    }
}
