//! Unified error types for the BotWave status client.
//!
//! Protocol-level problems (unknown commands, malformed lines, rejected
//! handshakes) are *not* errors here: they are answered on the wire or
//! recorded as a disconnect reason.  This type only covers local faults
//! in configuration and I/O plumbing.  All variants are `Copy`.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level client error
// ---------------------------------------------------------------------------

/// Every fallible local operation in the client funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
    /// The line transport failed.
    Transport(TransportError),
    /// Network bring-up (WiFi association, DHCP) failed.
    Network(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::Network(msg) => write!(f, "network: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Transport errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// No open connection to the server.
    NotConnected,
    /// Connecting to the server failed.
    ConnectFailed,
    /// Socket read/write failure.
    Io,
    /// Outbound line exceeds what the transport can carry in one frame.
    LineTooLong,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::ConnectFailed => write!(f, "connect failed"),
            Self::Io => write!(f, "socket I/O error"),
            Self::LineTooLong => write!(f, "line too long"),
        }
    }
}

impl From<TransportError> for Error {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Client-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
