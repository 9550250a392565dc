//! Inbound line channel.
//!
//! Transports receive lines on their own context (WebSocket event
//! callback, socket reader thread) and push them here.  The client's
//! dispatch loop drains the channel synchronously, so one line is fully
//! handled before the next is looked at.
//!
//! ```text
//! ┌──────────────────┐  InboundLine  ┌──────────────────┐
//! │ Transport task / │──────────────▶│  Dispatch loop   │
//! │ event callback   │               │  (sync, 1 line)  │
//! └──────────────────┘               └──────────────────┘
//! ```

use core::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use log::{error, warn};

/// Longest line accepted from the server (bytes).
pub const MAX_LINE_LEN: usize = 512;

/// Channel depth for inbound lines.
pub const INBOUND_DEPTH: usize = 16;

/// How long a producer waits for the dispatch loop to make room.
pub const PUSH_WAIT: Duration = Duration::from_secs(5);
const PUSH_RETRY: Duration = Duration::from_millis(10);

/// One received line, stored without heap allocation.
pub type InboundLine = heapless::String<MAX_LINE_LEN>;

/// Inbound line channel: transport → dispatch loop.
pub type LineChannel = Channel<CriticalSectionRawMutex, InboundLine, INBOUND_DEPTH>;

/// Copy `text` into an [`InboundLine`]; `None` if it does not fit.
pub fn line_from_str(text: &str) -> Option<InboundLine> {
    let mut line = InboundLine::new();
    line.push_str(text).ok()?;
    Some(line)
}

/// Queue received text, one entry per `\n`-separated line.
///
/// CR before each LF is stripped and blank lines are skipped.  While the
/// channel is full the caller blocks, for at most [`PUSH_WAIT`] per line.
/// Returns `false` (and logs) if any line was too long or timed out.
pub fn push_line(channel: &LineChannel, text: &str) -> bool {
    push_line_within(channel, text, PUSH_WAIT)
}

/// [`push_line`] with an explicit wait bound.
pub fn push_line_within(channel: &LineChannel, text: &str, wait: Duration) -> bool {
    let mut all_queued = true;

    for part in text.split('\n') {
        let part = part.trim_end_matches('\r');
        if part.trim().is_empty() {
            continue;
        }

        let Some(line) = line_from_str(part) else {
            warn!("inbound: line of {} bytes exceeds {}, dropping", part.len(), MAX_LINE_LEN);
            all_queued = false;
            continue;
        };

        all_queued &= send_blocking(channel, line, wait);
    }

    all_queued
}

fn send_blocking(channel: &LineChannel, mut line: InboundLine, wait: Duration) -> bool {
    let mut waited = Duration::ZERO;
    loop {
        match channel.try_send(line) {
            Ok(()) => return true,
            Err(TrySendError::Full(back)) => {
                if waited >= wait {
                    error!("inbound: dispatch loop stalled for {:?}, dropping '{}'", wait, back);
                    return false;
                }
                line = back;
                std::thread::sleep(PUSH_RETRY);
                waited += PUSH_RETRY;
            }
        }
    }
}

/// Take the next queued line, if any.
pub fn pop_line(channel: &LineChannel) -> Option<InboundLine> {
    channel.try_receive().ok()
}
