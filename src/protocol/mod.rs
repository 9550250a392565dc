//! BotWave line protocol.
//!
//! Shell-token text lines, one command per line.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                     Protocol Stack                         │
//! │                                                            │
//! │  ┌───────────┐   ┌───────────┐   ┌──────────────────────┐ │
//! │  │ Transport │──▶│ Tokenizer │──▶│ Codec → ServerMessage│ │
//! │  │ (channel) │   │ (quoting) │   │   → Dispatcher       │ │
//! │  └───────────┘   └───────────┘   └──────────────────────┘ │
//! │       ▲                                    │              │
//! │       │         ┌──────────────────────────┘              │
//! │       │         ▼                                         │
//! │  ┌───────────┐  ┌───────────┐                             │
//! │  │ Transport │◀─│  Codec    │   (replies, handshake)      │
//! │  │ (send)    │  │ (encode)  │                             │
//! │  └───────────┘  └───────────┘                             │
//! └────────────────────────────────────────────────────────────┘
//! ```

pub mod channels;
pub mod codec;
pub mod commands;
pub mod message;
pub mod tokenizer;
pub mod transport;

pub use codec::{Command, Kwargs, decode, decode_response, encode, encode_response};
pub use commands::CommandKind;
pub use message::ServerMessage;
