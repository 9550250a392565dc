//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured client events to the
//! logger (UART / USB-CDC in production, stderr on the host).

use log::{info, warn};

use crate::app::events::ClientEvent;
use crate::app::ports::EventSink;
use crate::session::handshake::HandshakeOutcome;

/// Adapter that logs every [`ClientEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ClientEvent) {
        match event {
            ClientEvent::PhaseChanged { from, to } => {
                info!("SESSION | {:?} -> {:?}", from, to);
            }
            ClientEvent::BroadcastChanged { from, to } => {
                info!("BROADCAST | {:?} -> {:?}", from, to);
            }
            ClientEvent::HandshakeFinished(HandshakeOutcome::Registered { attempts }) => {
                info!("HANDSHAKE | registered after {} polls", attempts);
            }
            ClientEvent::HandshakeFinished(HandshakeOutcome::Rejected { attempts }) => {
                warn!("HANDSHAKE | rejected after {} polls", attempts);
            }
            ClientEvent::HandshakeFinished(HandshakeOutcome::TimedOut) => {
                warn!("HANDSHAKE | timed out");
            }
            ClientEvent::Disconnected { reason } => {
                warn!("SESSION | disconnected: {}", reason);
            }
        }
    }
}
