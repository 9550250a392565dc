//! Wall-clock adapter.
//!
//! Broadcast start times arrive as Unix timestamps, so the client needs
//! real time rather than uptime.  `std::time::SystemTime` is backed by
//! `gettimeofday()` on ESP-IDF and by the OS clock on the host.  The
//! board boots at 1970 and only gets wall time from SNTP, which
//! [`start_sntp`] brings up once WiFi is connected.

use std::time::{SystemTime, UNIX_EPOCH};

use embedded_hal::delay::DelayNs;

use crate::app::ports::Clock;

/// Reject obviously unsynced time (before 2020-01-01).
const EPOCH_2020_MS: i64 = 1_577_836_800_000;

/// `true` for a reading that can only come from a set wall clock.
pub fn is_wall_time(now_ms: i64) -> bool {
    now_ms >= EPOCH_2020_MS
}

/// SNTP wait: 100 polls × 100 ms.
pub const SYNC_ATTEMPTS: u32 = 100;
pub const SYNC_POLL_MS: u32 = 100;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }

    /// `false` while the wall clock still reads a pre-2020 date.
    pub fn is_synced(&self) -> bool {
        is_wall_time(self.now_ms())
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_millis()).unwrap_or(i64::MAX),
            Err(_) => 0,
        }
    }
}

/// Poll `synced` up to `attempts` times, `interval_ms` apart.
///
/// Returns `true` as soon as it reports success, `false` once the
/// attempts are used up.
pub fn wait_for_sync(
    mut synced: impl FnMut() -> bool,
    delay: &mut impl DelayNs,
    attempts: u32,
    interval_ms: u32,
) -> bool {
    for _ in 0..attempts {
        if synced() {
            return true;
        }
        delay.delay_ms(interval_ms);
    }
    synced()
}

/// Start SNTP and block until the wall clock is set, or the wait runs out.
///
/// The returned handle must be kept alive for the clock to stay synced.
#[cfg(feature = "espidf")]
pub fn start_sntp(
    delay: &mut impl DelayNs,
) -> Result<esp_idf_svc::sntp::EspSntp<'static>, esp_idf_sys::EspError> {
    use esp_idf_svc::sntp::{EspSntp, SyncStatus};
    use log::{info, warn};

    let sntp = EspSntp::new_default()?;
    let clock = SystemClock::new();

    let synced = wait_for_sync(
        || sntp.get_sync_status() == SyncStatus::Completed && clock.is_synced(),
        delay,
        SYNC_ATTEMPTS,
        SYNC_POLL_MS,
    );
    if synced {
        info!("SNTP: wall clock set, now={} ms", clock.now_ms());
    } else {
        warn!(
            "SNTP: no sync after {} ms, planned start times will be off",
            SYNC_ATTEMPTS * SYNC_POLL_MS
        );
    }
    Ok(sntp)
}
