//! Client configuration parameters
//!
//! Built once at startup and handed by value to the components that need
//! it (transport, client service, dashboard loop).  Loaded from JSON; any
//! field missing from the document keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Protocol version announced with `VER` during the handshake.
pub const PROTOCOL_VERSION: &str = "2.0.1";

/// Core client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    // --- Network ---
    pub wifi_ssid: String,
    pub wifi_psk: String,

    // --- Server ---
    /// BotWave server host name or IP address
    pub server_host: String,
    /// BotWave server port
    pub server_port: u16,
    /// Server passkey; empty skips the `AUTH` step
    pub passkey: String,
    /// Protocol version sent with `VER`
    pub protocol_version: String,

    // --- Identity ---
    /// Hostname reported in `REGISTER`; empty derives one from the MAC
    pub hostname: String,

    // --- Timing ---
    /// Dashboard refresh period (milliseconds)
    pub refresh_rate_ms: u32,
    /// Delay between handshake polls (milliseconds)
    pub handshake_poll_interval_ms: u32,
    /// Number of handshake polls before giving up
    pub handshake_max_attempts: u32,

    // --- Misc ---
    /// Drive the status LED (it is very bright)
    pub use_led: bool,
    /// Log timing of parsing, handshake and main loop iterations
    pub debug_timer: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            wifi_ssid: String::new(),
            wifi_psk: String::new(),

            server_host: String::from("127.0.0.1"),
            server_port: 9939,
            passkey: String::new(),
            protocol_version: String::from(PROTOCOL_VERSION),

            hostname: String::new(),

            refresh_rate_ms: 1000,            // 1 Hz
            handshake_poll_interval_ms: 100,  // 10 Hz
            handshake_max_attempts: 50,       // 5 s budget

            use_led: false,
            debug_timer: false,
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the client cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.server_host.trim().is_empty() {
            return Err(Error::Config("server_host is empty"));
        }
        if self.server_port == 0 {
            return Err(Error::Config("server_port must be non-zero"));
        }
        if self.protocol_version.trim().is_empty() {
            return Err(Error::Config("protocol_version is empty"));
        }
        if self.refresh_rate_ms == 0 {
            return Err(Error::Config("refresh_rate_ms must be non-zero"));
        }
        if self.handshake_poll_interval_ms == 0 || self.handshake_max_attempts == 0 {
            return Err(Error::Config("handshake poll budget must be non-zero"));
        }
        Ok(())
    }

    /// `true` when an `AUTH` step is part of the handshake.
    pub fn has_passkey(&self) -> bool {
        !self.passkey.is_empty()
    }

    /// WebSocket URI of the BotWave server.
    pub fn server_uri(&self) -> String {
        format!("wss://{}:{}", self.server_host, self.server_port)
    }

    /// `host:port`, for plain socket transports.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
