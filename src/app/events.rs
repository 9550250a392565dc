//! Outbound client events.
//!
//! The [`BotWaveClient`](super::service::BotWaveClient) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters decide what
//! to do with them: log to serial, forward elsewhere, etc.

use crate::broadcast::BroadcastStatus;
use crate::session::SessionPhase;
use crate::session::handshake::HandshakeOutcome;

/// Structured events emitted by the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// The session phase changed.
    PhaseChanged { from: SessionPhase, to: SessionPhase },

    /// The broadcast status changed.
    BroadcastChanged {
        from: BroadcastStatus,
        to: BroadcastStatus,
    },

    /// The registration handshake finished.
    HandshakeFinished(HandshakeOutcome),

    /// The session is over; carries the reason shown to the user.
    Disconnected { reason: String },
}
