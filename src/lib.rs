//! oneshot-exchange: a fixed-greeting TCP exchange pair
//!
//! Two binaries share this crate:
//! - `oneshot-client` resolves a hostname, connects, sends one greeting,
//!   half-closes its write direction, and reports every reply until the
//!   server hangs up
//! - `oneshot-server` accepts exactly one client and acknowledges every
//!   chunk it sends
//!
//! Features:
//! - Candidate fallback when a hostname resolves to several addresses
//! - Explicit half-close signalling on both sides
//! - Configuration via CLI arguments or TOML file

pub mod client;
pub mod config;
pub mod error;
pub mod net;
pub mod protocol;
pub mod server;

pub use client::ClientSummary;
pub use config::{ClientConfig, ServerConfig};
pub use error::ExchangeError;
pub use server::ServerSummary;
