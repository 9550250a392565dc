//! Dashboard presentation policy.
//!
//! Turns read-only state snapshots into a [`StatusPage`] for the display
//! and a [`LedMode`] for the status LED.  Nothing here mutates state.
//!
//! | Broadcast | Title                 | LED   |
//! |-----------|-----------------------|-------|
//! | Stopped   | `CONNECTED`           | off   |
//! | Planned   | `PLANNED BROADCAST`   | blink |
//! | Playing   | `PLAYING <freq>MHz`   | on    |
//! | Live      | `LIVE <freq>MHz`      | on    |

use crate::broadcast::{BroadcastState, BroadcastStatus};

/// One screenful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPage {
    pub title: String,
    /// Lines separated by `\n`.
    pub body: String,
    /// Progress bar percentage, if one is shown.
    pub progress: Option<u8>,
}

impl StatusPage {
    pub fn new(title: &str, body: &str, progress: Option<u8>) -> Self {
        Self {
            title: title.to_owned(),
            body: body.to_owned(),
            progress,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMode {
    Off,
    On,
    Blink,
}

/// What the refresh loop draws for a connected session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub page: StatusPage,
    pub led: LedMode,
}

/// Render the connected dashboard.
pub fn render(broadcast: &BroadcastState, now_ms: i64) -> DashboardView {
    match broadcast.status() {
        BroadcastStatus::Stopped => DashboardView {
            page: StatusPage::new("CONNECTED", "No active broadcast.", None),
            led: LedMode::Off,
        },
        BroadcastStatus::Planned => {
            let remaining = broadcast.remaining_secs(now_ms).unwrap_or(0.0);
            let when = if remaining > 0.0 {
                format!("Starts in: {}", countdown_text(remaining))
            } else {
                String::from("Starting now...")
            };
            DashboardView {
                page: StatusPage {
                    title: String::from("PLANNED BROADCAST"),
                    body: format!("{}\nPS: {}", when, broadcast.ps()),
                    progress: broadcast.planned_progress(now_ms),
                },
                led: LedMode::Blink,
            }
        }
        BroadcastStatus::Playing | BroadcastStatus::Live => {
            let mode = if broadcast.status() == BroadcastStatus::Live { "LIVE" } else { "PLAYING" };
            let mut body = format!("PS: {}\nRT: {}", broadcast.ps(), broadcast.rt());
            if !broadcast.is_live_stream() {
                body.push_str("\nFile: ");
                body.push_str(broadcast.file());
            }
            DashboardView {
                page: StatusPage {
                    title: format!("{} {}MHz", mode, broadcast.frequency()),
                    body,
                    progress: None,
                },
                led: LedMode::On,
            }
        }
    }
}

/// `"{minutes}m {seconds}s"` for a positive number of seconds, truncated.
pub fn countdown_text(remaining_secs: f64) -> String {
    let whole = remaining_secs.max(0.0) as u64;
    format!("{}m {}s", whole / 60, whole % 60)
}

// ── Fixed pages ───────────────────────────────────────────────

pub fn connecting_page() -> StatusPage {
    StatusPage::new("CONNECTING", "Joining Wi-Fi network...", Some(20))
}

pub fn wifi_failed_page() -> StatusPage {
    StatusPage::new("ERROR", "Wi-Fi Connection Failed", Some(0))
}

pub fn handshaking_page() -> StatusPage {
    StatusPage::new("BOTWAVE", "Handshaking with server...", Some(60))
}

/// Shown when the handshake does not complete.
pub fn timeout_page(reason: &str) -> StatusPage {
    StatusPage::new("TIMEOUT", reason, None)
}

/// Shown when a registered session ends.
pub fn disconnected_page(reason: &str) -> StatusPage {
    StatusPage::new("DISCONNECTED", reason, None)
}
