//! Transport abstraction: any line-oriented channel to the server.
//!
//! Concrete implementations:
//! - WebSocket text frames (ESP-IDF, `adapters::ws_transport`)
//! - Newline-delimited TCP (host, `adapters::tcp_transport`)
//!
//! The client service is generic over `LineTransport`, so the protocol
//! logic never touches sockets.

use super::channels::InboundLine;

/// Line-oriented transport channel.
pub trait LineTransport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// `true` while the underlying connection is established.
    fn is_open(&self) -> bool;

    /// Send one line (without trailing newline).
    fn send_line(&mut self, line: &str) -> Result<(), Self::Error>;

    /// Take the next received line, if any.  Never blocks.
    fn recv_line(&mut self) -> Option<InboundLine>;
}

/// A null transport that is never open, discards writes and never reads.
/// Useful as a placeholder before the network is up.
pub struct NullTransport;

impl LineTransport for NullTransport {
    type Error = ();

    fn is_open(&self) -> bool {
        false
    }

    fn send_line(&mut self, _line: &str) -> Result<(), ()> {
        Ok(())
    }

    fn recv_line(&mut self) -> Option<InboundLine> {
        None
    }
}
