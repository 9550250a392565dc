//! Command dispatcher: routes one decoded command into the session and
//! broadcast state machines and builds the reply line, if any.
//!
//! Pure and synchronous: no I/O, no retries.  Missing kwargs and bad
//! timestamps fall back to defaults locally.  Unknown commands are
//! answered with `ERROR`, never treated as local faults.
//!
//! | Received           | Effect                                   | Reply                |
//! |--------------------|------------------------------------------|----------------------|
//! | `REGISTER_OK`      | session → Registered                     | -                    |
//! | `KICK`             | session → Kicked (reason kwarg)          | -                    |
//! | `VERSION_MISMATCH` | session → Kicked                         | -                    |
//! | `AUTH_FAILED`      | session → Kicked                         | -                    |
//! | `PING`             | -                                        | `PONG`               |
//! | `LIST_FILES`       | -                                        | `OK files={}`        |
//! | `START`            | broadcast → Planned                      | `OK message=..`      |
//! | `STOP`             | broadcast → Stopped                      | `OK message=..`      |
//! | `STREAM_TOKEN`     | broadcast → Live, file = "none"          | `OK message=..`      |
//! | anything else      | -                                        | `ERROR message=..`   |

use log::debug;

use crate::broadcast::{BroadcastState, resolve_start_at};
use crate::protocol::message::{LiveParams, StartParams};
use crate::protocol::{Command, CommandKind, ServerMessage, encode, encode_response};
use crate::session::{
    REASON_AUTH_FAILED, REASON_KICKED, REASON_VERSION_MISMATCH, SessionState,
};

pub const START_ACK: &str = "Start acknowledged";
pub const STOP_ACK: &str = "Stop acknowledged";
pub const LIVE_ACK: &str = "Live acknowledged";

/// Handle one command.  Returns the line to send back, if any.
///
/// Once the session is kicked nothing is acted upon.
pub fn dispatch(
    command: &Command,
    session: &mut SessionState,
    broadcast: &mut BroadcastState,
    now_ms: i64,
) -> Option<String> {
    if session.is_kicked() {
        debug!("dispatch: session kicked, ignoring {}", command.name);
        return None;
    }

    debug!("dispatch: command received: {}", command.name);

    match ServerMessage::classify(command) {
        ServerMessage::Empty => None,

        // ── Session ───────────────────────────────────────────
        ServerMessage::RegisterOk => {
            session.mark_registered();
            None
        }
        ServerMessage::Kick { reason } => {
            session.kick(reason.unwrap_or(REASON_KICKED));
            None
        }
        ServerMessage::VersionMismatch => {
            session.kick(REASON_VERSION_MISMATCH);
            None
        }
        ServerMessage::AuthFailed => {
            session.kick(REASON_AUTH_FAILED);
            None
        }
        ServerMessage::Ping => Some(encode(CommandKind::Pong.as_str(), &[], &[])),
        ServerMessage::ListFiles => Some(encode(CommandKind::Ok.as_str(), &[], &[("files", "{}")])),

        // ── Broadcast ─────────────────────────────────────────
        ServerMessage::Start(params) => Some(handle_start(params, broadcast, now_ms)),
        ServerMessage::Stop => {
            broadcast.stop();
            Some(encode_response(CommandKind::Ok.as_str(), STOP_ACK))
        }
        ServerMessage::StreamToken(params) => Some(handle_live(params, broadcast)),

        ServerMessage::Unhandled(name) => Some(encode_response(
            CommandKind::Error.as_str(),
            &format!("The command {name} is not implemented :/"),
        )),
    }
}

fn handle_start(params: StartParams<'_>, broadcast: &mut BroadcastState, now_ms: i64) -> String {
    let start_at_ms = resolve_start_at(params.start_at, now_ms);
    broadcast.plan(
        params.ps,
        params.rt,
        params.filename,
        params.frequency,
        start_at_ms,
    );
    encode_response(CommandKind::Ok.as_str(), START_ACK)
}

// STREAM_TOKEN only carries display metadata; no token is exchanged.
fn handle_live(params: LiveParams<'_>, broadcast: &mut BroadcastState) -> String {
    broadcast.go_live(params.ps, params.rt, params.frequency);
    encode_response(CommandKind::Ok.as_str(), LIVE_ACK)
}
