//! Broadcast lifecycle.
//!
//! ```text
//!  STOPPED ──[START]──▶ PLANNED ──[now ≥ start_at]──▶ PLAYING
//!     ▲  ▲                 │                              │
//!     │  └────[STOP]───────┘                              │
//!     │                                                   │
//!     ├────────────────────[STOP]─────────────────────────┘
//!     │
//!     └──[STOP]── LIVE ◀──[STREAM_TOKEN]── (any state)
//! ```
//!
//! `START` and `STREAM_TOKEN` are accepted from any state.  Time is
//! carried as Unix epoch milliseconds.

use log::{info, warn};

/// `file` value marking a live stream with no backing file.
pub const LIVE_FILE: &str = "none";
/// Placeholder for display fields the server left out.
pub const UNKNOWN: &str = "Unknown";
/// Frequency (MHz) used when none is given.
pub const DEFAULT_FREQUENCY: &str = "90.0";
/// Countdown window over which the planned progress bar fills.
pub const COUNTDOWN_WINDOW_SECS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BroadcastStatus {
    Stopped,
    Planned,
    Playing,
    Live,
}

/// Everything the display needs to show about the current broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastState {
    status: BroadcastStatus,
    /// Program service name.
    ps: String,
    /// Radio text.
    rt: String,
    file: String,
    /// Frequency in MHz, as sent.
    frequency: String,
    /// Only meaningful while `Planned`.
    start_at_ms: i64,
}

impl Default for BroadcastState {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastState {
    pub fn new() -> Self {
        Self {
            status: BroadcastStatus::Stopped,
            ps: String::new(),
            rt: String::new(),
            file: String::new(),
            frequency: String::from(DEFAULT_FREQUENCY),
            start_at_ms: 0,
        }
    }

    // ── Read-only view ────────────────────────────────────────

    pub fn status(&self) -> BroadcastStatus {
        self.status
    }

    pub fn ps(&self) -> &str {
        &self.ps
    }

    pub fn rt(&self) -> &str {
        &self.rt
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn frequency(&self) -> &str {
        &self.frequency
    }

    pub fn start_at_ms(&self) -> i64 {
        self.start_at_ms
    }

    /// `true` when the broadcast has no backing file.
    pub fn is_live_stream(&self) -> bool {
        self.file == LIVE_FILE
    }

    // ── Transitions ───────────────────────────────────────────

    /// Schedule a file broadcast.  Missing fields fall back to placeholders.
    pub fn plan(
        &mut self,
        ps: Option<&str>,
        rt: Option<&str>,
        file: Option<&str>,
        frequency: Option<&str>,
        start_at_ms: i64,
    ) {
        self.ps = String::from(ps.unwrap_or(UNKNOWN));
        self.rt = String::from(rt.unwrap_or(UNKNOWN));
        self.file = String::from(file.unwrap_or(UNKNOWN));
        self.frequency = String::from(frequency.unwrap_or(DEFAULT_FREQUENCY));
        self.start_at_ms = start_at_ms;
        self.status = BroadcastStatus::Planned;
        info!(
            "broadcast: planned '{}' on {} MHz at {} ms",
            self.file, self.frequency, start_at_ms
        );
    }

    /// Mark a live stream.
    pub fn go_live(&mut self, ps: Option<&str>, rt: Option<&str>, frequency: Option<&str>) {
        self.ps = String::from(ps.unwrap_or(UNKNOWN));
        self.rt = String::from(rt.unwrap_or(UNKNOWN));
        self.file = String::from(LIVE_FILE);
        self.frequency = String::from(frequency.unwrap_or(DEFAULT_FREQUENCY));
        self.status = BroadcastStatus::Live;
        info!("broadcast: live on {} MHz", self.frequency);
    }

    pub fn stop(&mut self) {
        self.status = BroadcastStatus::Stopped;
    }

    /// Periodic check: a planned broadcast whose start time has come
    /// begins playing.  Returns `true` only on the transition itself.
    pub fn check_planned(&mut self, now_ms: i64) -> bool {
        if self.status == BroadcastStatus::Planned && now_ms >= self.start_at_ms {
            self.status = BroadcastStatus::Playing;
            info!("broadcast: planned broadcast is now starting");
            return true;
        }
        false
    }

    // ── Countdown ─────────────────────────────────────────────

    /// Seconds until a planned broadcast starts (negative once overdue).
    /// `None` unless `Planned`.
    pub fn remaining_secs(&self, now_ms: i64) -> Option<f64> {
        (self.status == BroadcastStatus::Planned)
            .then(|| (self.start_at_ms - now_ms) as f64 / 1000.0)
    }

    /// Countdown progress: 0 % with a minute or more to go, 100 % at the start time.
    pub fn planned_progress(&self, now_ms: i64) -> Option<u8> {
        self.remaining_secs(now_ms).map(countdown_progress)
    }
}

/// `clamp(100 · (1 − remaining / 60), 0, 100)`, truncated.
pub fn countdown_progress(remaining_secs: f64) -> u8 {
    (100.0 * (1.0 - remaining_secs / COUNTDOWN_WINDOW_SECS)).clamp(0.0, 100.0) as u8
}

/// Resolve a `start_at` kwarg (Unix epoch seconds, possibly fractional)
/// to epoch milliseconds.
///
/// Absent, empty, unparseable, non-finite or non-positive values mean
/// "start now".
pub fn resolve_start_at(raw: Option<&str>, now_ms: i64) -> i64 {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return now_ms;
    };

    let secs = match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v as i64,
        Ok(_) | Err(_) => {
            warn!("broadcast: timestamp parse failed for '{}', starting now", raw);
            return now_ms;
        }
    };

    if secs <= 0 {
        return now_ms;
    }

    secs.checked_mul(1000).unwrap_or(now_ms)
}
