//! The exchange contract shared by both endpoints.
//!
//! The wire format is an unstructured byte stream with no framing. Each
//! side stages I/O through a fixed-capacity transfer buffer, so a single
//! read may return a prefix of a message, a whole message, or several
//! messages run together. The receiver treats whatever arrives as one
//! opaque chunk.
//!
//! ## Exchange shape
//!
//! ```text
//! client: connect -> send greeting -> half-close write -> drain replies
//! server: accept  -> ack per chunk -> observe EOF -> half-close write
//! ```
//!
//! The client half-closes first; the server half-closes only after seeing
//! the client's end-of-output. Reversing that order would let a client that
//! is still waiting for replies mistake the server's half-close for a
//! connection failure.

/// TCP port both endpoints use unless overridden by configuration.
pub const DEFAULT_PORT: u16 = 27015;

/// Capacity of the per-connection transfer buffer.
///
/// Bounds the size of a single chunk; larger payloads simply arrive across
/// multiple reads.
pub const TRANSFER_BUFFER_SIZE: usize = 512;

/// Fixed payload the client sends once after connecting.
pub const CLIENT_GREETING: &[u8] = b"Hello, I am client, can you receive my message?";

/// Fixed payload the server sends back for every non-empty chunk it reads.
pub const SERVER_ACK: &[u8] = b"Hi, I am server. I have received your message.";
