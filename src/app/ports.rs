//! Port traits: the hexagonal boundary between the protocol core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ BotWaveClient (domain)
//! ```
//!
//! The transport port lives with the protocol in
//! [`LineTransport`](crate::protocol::transport::LineTransport); the
//! handshake delay uses `embedded_hal::delay::DelayNs` directly.

use crate::dashboard::{LedMode, StatusPage};

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source, comparable to broadcast start times.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_ms(&self) -> i64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The client emits structured [`ClientEvent`](super::events::ClientEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::ClientEvent);
}

// ───────────────────────────────────────────────────────────────
// Display port (domain → screen)
// ───────────────────────────────────────────────────────────────

/// Renders one status page: a title, a (multi-line) body and an optional
/// progress bar.  Pixel drawing is the adapter's business.
pub trait DisplayPort {
    fn show(&mut self, page: &StatusPage);
}

// ───────────────────────────────────────────────────────────────
// Indicator port (domain → status LED)
// ───────────────────────────────────────────────────────────────

/// Applied once per refresh; `Blink` toggles on every call.
pub trait IndicatorPort {
    fn apply(&mut self, mode: LedMode);
}

/// An absent indicator (LED disabled in config) ignores every request.
impl<I: IndicatorPort> IndicatorPort for Option<I> {
    fn apply(&mut self, mode: LedMode) {
        if let Some(indicator) = self {
            indicator.apply(mode);
        }
    }
}
