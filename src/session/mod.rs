//! Session phase machine.
//!
//! ```text
//!  NOT_CONNECTED ──[handshake sent]──▶ HANDSHAKING ──[REGISTER_OK]──▶ REGISTERED
//!                                           │                             │
//!                       [KICK / AUTH_FAILED / VERSION_MISMATCH]         [KICK]
//!                                           ▼                             │
//!                                        KICKED ◀─────────────────────────┘
//! ```
//!
//! The phase only moves forward.  `Kicked` is terminal: the caller tears
//! the connection down and decides whether to reconnect.

pub mod handshake;

use log::{info, warn};

/// Reason reported when the server never completes the handshake.
pub const REASON_TIMEOUT: &str = "Server did not respond in time.";
/// Reason reported when a registered connection drops.
pub const REASON_CONNECTION_LOST: &str = "Connection to the server lost.";
/// Reason used by `KICK` without a `reason` kwarg.
pub const REASON_KICKED: &str = "Kicked by administrator";
pub const REASON_VERSION_MISMATCH: &str = "Protocol version mismatch.";
pub const REASON_AUTH_FAILED: &str = "Incorrect passkey.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionPhase {
    NotConnected,
    Handshaking,
    Registered,
    Kicked,
}

/// Phase plus the human-readable reason shown if the session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    phase: SessionPhase,
    disconnect_reason: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::NotConnected,
            disconnect_reason: String::from(REASON_TIMEOUT),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn disconnect_reason(&self) -> &str {
        &self.disconnect_reason
    }

    pub fn is_registered(&self) -> bool {
        self.phase == SessionPhase::Registered
    }

    pub fn is_kicked(&self) -> bool {
        self.phase == SessionPhase::Kicked
    }

    /// Handshake lines have been sent.  Only valid from `NotConnected`.
    pub fn begin_handshake(&mut self) -> bool {
        if self.phase != SessionPhase::NotConnected {
            warn!("session: handshake requested in {:?}, ignoring", self.phase);
            return false;
        }
        self.phase = SessionPhase::Handshaking;
        true
    }

    /// Server accepted the registration.
    pub fn mark_registered(&mut self) -> bool {
        match self.phase {
            SessionPhase::NotConnected | SessionPhase::Handshaking => {
                self.phase = SessionPhase::Registered;
                info!("session: registered");
                true
            }
            SessionPhase::Registered | SessionPhase::Kicked => false,
        }
    }

    /// Handshake completed with an open transport: any later drop is a
    /// lost connection rather than a timeout.
    pub fn confirm_connected(&mut self) {
        if self.is_registered() {
            self.disconnect_reason = String::from(REASON_CONNECTION_LOST);
        }
    }

    /// Terminal rejection by the server.  The first kick wins.
    pub fn kick(&mut self, reason: &str) -> bool {
        if self.is_kicked() {
            return false;
        }
        warn!("session: kicked from {:?}: {}", self.phase, reason);
        self.phase = SessionPhase::Kicked;
        self.disconnect_reason = String::from(reason);
        true
    }
}
