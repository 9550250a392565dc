//! Registration handshake.
//!
//! On connect the client sends, in this order:
//!
//! 1. `REGISTER hostname=.. machine=.. system=.. release=..`
//! 2. `AUTH <passkey>` (only when a passkey is configured)
//! 3. `VER <protocol_version>`
//!
//! then polls for `REGISTER_OK` at a fixed interval with a bounded number
//! of attempts.  A rejection (`KICK`, `AUTH_FAILED`, `VERSION_MISMATCH`)
//! ends the wait immediately.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::config::ClientConfig;
use crate::protocol::{CommandKind, encode};

/// Machine metadata reported with `REGISTER`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineIdentity {
    pub hostname: String,
    /// Platform / board name.
    pub machine: String,
    /// Platform firmware version.
    pub system: String,
    /// Client release identifier.
    pub release: String,
}

/// Build the handshake lines in send order.
pub fn handshake_lines(config: &ClientConfig, identity: &MachineIdentity) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);

    lines.push(encode(
        CommandKind::Register.as_str(),
        &[],
        &[
            ("hostname", identity.hostname.as_str()),
            ("machine", identity.machine.as_str()),
            ("system", identity.system.as_str()),
            ("release", identity.release.as_str()),
        ],
    ));

    if config.has_passkey() {
        lines.push(encode(CommandKind::Auth.as_str(), &[config.passkey.as_str()], &[]));
    }

    lines.push(encode(
        CommandKind::Ver.as_str(),
        &[config.protocol_version.as_str()],
        &[],
    ));

    lines
}

/// Poll cadence and budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandshakePolicy {
    pub poll_interval_ms: u32,
    pub max_attempts: u32,
}

impl HandshakePolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            poll_interval_ms: config.handshake_poll_interval_ms,
            max_attempts: config.handshake_max_attempts,
        }
    }
}

impl Default for HandshakePolicy {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            max_attempts: 50,
        }
    }
}

/// What one poll observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStatus {
    /// Nothing decisive yet.
    Pending,
    /// Registered and the transport is open.
    Registered,
    /// The server rejected the session.
    Rejected,
}

/// How the handshake ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeOutcome {
    /// Registered on the given (1-based) attempt.
    Registered { attempts: u32 },
    /// Rejected on the given (1-based) attempt.
    Rejected { attempts: u32 },
    /// Budget exhausted.
    TimedOut,
}

impl HandshakeOutcome {
    pub fn is_success(self) -> bool {
        matches!(self, Self::Registered { .. })
    }
}

/// Run `poll` up to `policy.max_attempts` times, sleeping
/// `policy.poll_interval_ms` after every undecided attempt.
pub fn wait_for_registration(
    policy: HandshakePolicy,
    delay: &mut impl DelayNs,
    mut poll: impl FnMut() -> PollStatus,
) -> HandshakeOutcome {
    for attempt in 1..=policy.max_attempts {
        match poll() {
            PollStatus::Registered => {
                info!("handshake: registration successful (attempt {})", attempt);
                return HandshakeOutcome::Registered { attempts: attempt };
            }
            PollStatus::Rejected => {
                warn!("handshake: rejected by server (attempt {})", attempt);
                return HandshakeOutcome::Rejected { attempts: attempt };
            }
            PollStatus::Pending => delay.delay_ms(policy.poll_interval_ms),
        }
    }

    warn!("handshake: registration timeout after {} attempts", policy.max_attempts);
    HandshakeOutcome::TimedOut
}
