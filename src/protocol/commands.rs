//! The closed set of command names spoken on the BotWave wire.
//!
//! Names are matched case-insensitively on receipt and always emitted
//! uppercase.

use core::fmt;
use core::str::FromStr;

/// Every command name the protocol defines, in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Auth,
    Ver,
    Register,
    Ping,
    Pong,
    Start,
    Stop,
    UploadToken,
    DownloadToken,
    DownloadUrl,
    StreamToken,
    Kick,
    ListFiles,
    RemoveFile,
    Ok,
    Error,
    RegisterOk,
    AuthFailed,
    VersionMismatch,
}

impl CommandKind {
    pub const ALL: [Self; 19] = [
        Self::Auth,
        Self::Ver,
        Self::Register,
        Self::Ping,
        Self::Pong,
        Self::Start,
        Self::Stop,
        Self::UploadToken,
        Self::DownloadToken,
        Self::DownloadUrl,
        Self::StreamToken,
        Self::Kick,
        Self::ListFiles,
        Self::RemoveFile,
        Self::Ok,
        Self::Error,
        Self::RegisterOk,
        Self::AuthFailed,
        Self::VersionMismatch,
    ];

    /// Uppercase wire spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "AUTH",
            Self::Ver => "VER",
            Self::Register => "REGISTER",
            Self::Ping => "PING",
            Self::Pong => "PONG",
            Self::Start => "START",
            Self::Stop => "STOP",
            Self::UploadToken => "UPLOAD_TOKEN",
            Self::DownloadToken => "DOWNLOAD_TOKEN",
            Self::DownloadUrl => "DOWNLOAD_URL",
            Self::StreamToken => "STREAM_TOKEN",
            Self::Kick => "KICK",
            Self::ListFiles => "LIST_FILES",
            Self::RemoveFile => "REMOVE_FILE",
            Self::Ok => "OK",
            Self::Error => "ERROR",
            Self::RegisterOk => "REGISTER_OK",
            Self::AuthFailed => "AUTH_FAILED",
            Self::VersionMismatch => "VERSION_MISMATCH",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`CommandKind::from_str`] for names outside the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCommand;

impl FromStr for CommandKind {
    type Err = UnknownCommand;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or(UnknownCommand)
    }
}
