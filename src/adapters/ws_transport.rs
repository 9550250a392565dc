//! WebSocket transport adapter (ESP-IDF).
//!
//! Implements [`LineTransport`] over `esp_idf_svc::ws::client`.  Outbound
//! lines go out one per text frame; an inbound frame may carry several
//! newline-separated lines.  The ESP-IDF client runs its own task and
//! delivers frames to an event callback, which pushes them into a static
//! [`LineChannel`] drained by `recv_line()`.  A full channel stalls the
//! callback until the dispatch loop catches up.
//!
//! The server is reached over `wss://`.  BotWave servers commonly use a
//! self-signed certificate, so the firmware is built with
//! `CONFIG_ESP_TLS_INSECURE` / `CONFIG_ESP_TLS_SKIP_SERVER_CERT_VERIFY`.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;

use esp_idf_svc::io::EspIOError;
use esp_idf_svc::ws::FrameType;
use esp_idf_svc::ws::client::{
    EspWebSocketClient, EspWebSocketClientConfig, WebSocketEvent, WebSocketEventType,
};
use log::{info, warn};

use crate::error::TransportError;
use crate::protocol::channels::{InboundLine, LineChannel, MAX_LINE_LEN, pop_line, push_line};
use crate::protocol::transport::LineTransport;

/// Inbound lines from the WebSocket task.
static INBOUND: LineChannel = LineChannel::new();
/// Set by the event callback on connect, cleared on close.
static OPEN: AtomicBool = AtomicBool::new(false);

/// How long `connect()` waits for the socket to open.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_POLL: Duration = Duration::from_millis(100);

pub struct WsLineTransport {
    client: EspWebSocketClient<'static>,
}

impl WsLineTransport {
    /// Open a WebSocket to `uri` and block until it is connected.
    pub fn connect(uri: &str) -> Result<Self, TransportError> {
        OPEN.store(false, Ordering::Release);

        let config = EspWebSocketClientConfig {
            skip_cert_common_name_check: true,
            ..Default::default()
        };

        let client = EspWebSocketClient::new(uri, &config, CONNECT_TIMEOUT, on_event).map_err(|e| {
            warn!("WS: client start failed: {:?}", e);
            TransportError::ConnectFailed
        })?;

        let mut waited = Duration::ZERO;
        while !OPEN.load(Ordering::Acquire) {
            if waited >= CONNECT_TIMEOUT {
                warn!("WS: {} did not open within {:?}", uri, CONNECT_TIMEOUT);
                return Err(TransportError::ConnectFailed);
            }
            std::thread::sleep(CONNECT_POLL);
            waited += CONNECT_POLL;
        }

        info!("WS: connected to {}", uri);
        Ok(Self { client })
    }
}

fn on_event(event: &Result<WebSocketEvent<'_>, EspIOError>) {
    let event = match event {
        Ok(event) => event,
        Err(e) => {
            warn!("WS: event error: {:?}", e);
            return;
        }
    };

    match event.event_type {
        WebSocketEventType::Connected => OPEN.store(true, Ordering::Release),
        WebSocketEventType::Disconnected | WebSocketEventType::Close(_) | WebSocketEventType::Closed => {
            if OPEN.swap(false, Ordering::AcqRel) {
                info!("WS: connection closed");
            }
        }
        WebSocketEventType::Text(text) => {
            push_line(&INBOUND, text);
        }
        _ => {}
    }
}

impl LineTransport for WsLineTransport {
    type Error = TransportError;

    fn is_open(&self) -> bool {
        OPEN.load(Ordering::Acquire) && self.client.is_connected()
    }

    fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        if !self.is_open() {
            return Err(TransportError::NotConnected);
        }
        if line.len() > MAX_LINE_LEN {
            return Err(TransportError::LineTooLong);
        }
        self.client
            .send(FrameType::Text(false), line.as_bytes())
            .map_err(|e| {
                warn!("WS: send failed: {:?}", e);
                TransportError::Io
            })
    }

    fn recv_line(&mut self) -> Option<InboundLine> {
        pop_line(&INBOUND)
    }
}
