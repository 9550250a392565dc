//! Typed view of a server-to-client command.
//!
//! The generic [`Command`] bag is narrowed into one variant per command
//! the client acts on, so the dispatcher can match exhaustively.  Fields
//! borrow from the command and stay `None` when the kwarg is absent;
//! defaults are applied by the state machines, not here.

use super::codec::Command;
use super::commands::CommandKind;

/// Kwargs carried by `START`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartParams<'a> {
    pub ps: Option<&'a str>,
    pub rt: Option<&'a str>,
    pub filename: Option<&'a str>,
    pub frequency: Option<&'a str>,
    /// Unix epoch seconds, as sent (may be fractional or garbage).
    pub start_at: Option<&'a str>,
}

/// Kwargs carried by `STREAM_TOKEN`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveParams<'a> {
    pub ps: Option<&'a str>,
    pub rt: Option<&'a str>,
    pub frequency: Option<&'a str>,
}

/// A received command, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessage<'a> {
    /// Blank line.
    Empty,
    RegisterOk,
    Kick { reason: Option<&'a str> },
    VersionMismatch,
    AuthFailed,
    Ping,
    ListFiles,
    Start(StartParams<'a>),
    Stop,
    StreamToken(LiveParams<'a>),
    /// Anything the client does not act on, including known names such as
    /// `UPLOAD_TOKEN` or `REMOVE_FILE`.  Carries the received name.
    Unhandled(&'a str),
}

impl<'a> ServerMessage<'a> {
    /// Classify a decoded command.
    pub fn classify(command: &'a Command) -> Self {
        if command.is_empty() {
            return Self::Empty;
        }

        let Ok(kind) = command.name.parse::<CommandKind>() else {
            return Self::Unhandled(&command.name);
        };

        match kind {
            CommandKind::RegisterOk => Self::RegisterOk,
            CommandKind::Kick => Self::Kick {
                reason: command.get("reason"),
            },
            CommandKind::VersionMismatch => Self::VersionMismatch,
            CommandKind::AuthFailed => Self::AuthFailed,
            CommandKind::Ping => Self::Ping,
            CommandKind::ListFiles => Self::ListFiles,
            CommandKind::Start => Self::Start(StartParams {
                ps: command.get("ps"),
                rt: command.get("rt"),
                filename: command.get("filename"),
                frequency: command.get("frequency"),
                start_at: command.get("start_at"),
            }),
            CommandKind::Stop => Self::Stop,
            CommandKind::StreamToken => Self::StreamToken(LiveParams {
                ps: command.get("ps"),
                rt: command.get("rt"),
                frequency: command.get("frequency"),
            }),
            CommandKind::Auth
            | CommandKind::Ver
            | CommandKind::Register
            | CommandKind::Pong
            | CommandKind::UploadToken
            | CommandKind::DownloadToken
            | CommandKind::DownloadUrl
            | CommandKind::RemoveFile
            | CommandKind::Ok
            | CommandKind::Error => Self::Unhandled(&command.name),
        }
    }
}
