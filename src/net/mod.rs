//! Blocking transport layer.
//!
//! Wraps the raw socket calls behind a small seam so the exchange logic in
//! `client` and `server` never touches `TcpStream` directly:
//! - `Connection`: an established stream with chunked reads, full writes,
//!   and explicit half-close state
//! - `bind_any` / `accept_one`: passive endpoint construction and the
//!   single accept
//! - `resolve` / `connect_first`: name lookup and candidate fallback
//!
//! Every call here blocks until it completes or fails. A future concurrent
//! runtime can replace this layer without touching the exchange contract.

mod connection;
mod listener;
mod resolve;

pub use connection::{Connection, SendState};
pub use listener::{accept_one, bind_any};
pub use resolve::{connect_first, resolve};
