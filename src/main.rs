//! BotWave Status Firmware: Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  WsLineTransport   LogEventSink   LogDisplay   SystemClock     │
//! │  (LineTransport)   (EventSink)    (Display)    (Clock)         │
//! │  StatusLed         wifi           device_id                    │
//! │  (Indicator)                                                   │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              BotWaveClient (pure logic)                │    │
//! │  │  Session · Broadcast · Dispatch                        │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Start-up: WiFi → SNTP → WebSocket → handshake → refresh loop.  There is no
//! reconnect; once the session ends the device waits for a reset.
#![deny(unused_must_use)]

use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use log::{debug, error, info};

use botwave_status::adapters::device_id;
use botwave_status::adapters::log_display::LogDisplay;
use botwave_status::adapters::log_sink::LogEventSink;
use botwave_status::adapters::status_led::StatusLed;
use botwave_status::adapters::time::{self, SystemClock};
use botwave_status::adapters::wifi;
use botwave_status::adapters::ws_transport::WsLineTransport;
use botwave_status::app::ports::DisplayPort;
use botwave_status::app::service::{BotWaveClient, RefreshOutcome};
use botwave_status::config::ClientConfig;
use botwave_status::dashboard;
use botwave_status::session::REASON_TIMEOUT;

/// Build-time configuration, see `config/botwave.json`.
const CONFIG_JSON: &str = include_str!("../config/botwave.json");

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  BotWave Status v{}                ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = ClientConfig::from_json(CONFIG_JSON).map_err(|e| anyhow!("{}", e))?;
    info!(
        "Config: server={} hostname='{}' led={} debug_timer={}",
        config.server_uri(),
        config.hostname,
        config.use_led,
        config.debug_timer
    );

    let peripherals = Peripherals::take()?;
    let sysloop = EspSystemEventLoop::take()?;
    let nvs = EspDefaultNvsPartition::take()?;

    let mut display = LogDisplay::new();
    let mut sink = LogEventSink::new();

    // ── 3. WiFi ───────────────────────────────────────────────
    display.show(&dashboard::connecting_page());
    let _wifi = match wifi::connect(
        peripherals.modem,
        sysloop,
        nvs,
        &config.wifi_ssid,
        &config.wifi_psk,
    ) {
        Ok(wifi) => wifi,
        Err(e) => {
            error!("WiFi bring-up failed: {}", e);
            display.show(&dashboard::wifi_failed_page());
            halt();
        }
    };

    // ── 4. Wall clock ─────────────────────────────────────────
    // Planned start times are Unix timestamps; the board boots at 1970.
    let _sntp = time::start_sntp(&mut FreeRtos)?;

    // ── 5. Server connection + handshake ──────────────────────
    display.show(&dashboard::handshaking_page());
    let transport = match WsLineTransport::connect(&config.server_uri()) {
        Ok(t) => t,
        Err(e) => {
            error!("Server connection failed: {}", e);
            display.show(&dashboard::timeout_page(REASON_TIMEOUT));
            halt();
        }
    };

    let mut led = if config.use_led {
        Some(StatusLed::new(PinDriver::output(peripherals.pins.gpio35)?))
    } else {
        None
    };

    let identity = device_id::machine_identity(&config, &device_id::read_mac());
    let refresh_period = Duration::from_millis(u64::from(config.refresh_rate_ms));
    let debug_timer = config.debug_timer;
    let mut client = BotWaveClient::new(config, identity, transport, SystemClock::new());

    let handshake_started = Instant::now();
    let outcome = client.connect(&mut FreeRtos, &mut sink);
    if debug_timer {
        debug!("handshake took {} ms", handshake_started.elapsed().as_millis());
    }

    // ── 6. Refresh loop ───────────────────────────────────────
    if outcome.is_success() {
        loop {
            let started = Instant::now();
            if client.refresh(&mut display, &mut led, &mut sink) == RefreshOutcome::Disconnected {
                break;
            }
            if let Some(rest) = refresh_period.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    } else {
        display.show(&dashboard::timeout_page(client.session().disconnect_reason()));
    }

    info!(
        "End of program ({}). Use RST button to restart.",
        client.session().disconnect_reason()
    );
    halt();
}

/// Park the main task until the user resets the board.
fn halt() -> ! {
    loop {
        FreeRtos::delay_ms(u32::MAX);
    }
}
