//! Mock adapters for integration tests.
//!
//! Records every outbound line, page, LED mode and event so tests can
//! assert on the full history without a server or real hardware.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;

use botwave_status::app::events::ClientEvent;
use botwave_status::app::ports::{Clock, DisplayPort, EventSink, IndicatorPort};
use botwave_status::app::service::BotWaveClient;
use botwave_status::config::ClientConfig;
use botwave_status::dashboard::{LedMode, StatusPage};
use botwave_status::protocol::channels::{InboundLine, line_from_str};
use botwave_status::protocol::transport::LineTransport;
use botwave_status::session::handshake::MachineIdentity;
use embedded_hal::delay::DelayNs;

pub const T0: i64 = 1_700_000_000_000;

// ── MockTransport ─────────────────────────────────────────────

/// Scripted transport.  Inbound lines arrive in batches: each drain of
/// `recv_line()` yields one batch and then `None`.
pub struct MockTransport {
    pub open: bool,
    pub sent: Vec<String>,
    batches: VecDeque<VecDeque<InboundLine>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self {
            open: true,
            sent: Vec::new(),
            batches: VecDeque::new(),
        }
    }

    /// Queue lines that arrive together.
    pub fn push_batch(&mut self, lines: &[&str]) {
        self.batches
            .push_back(lines.iter().filter_map(|l| line_from_str(l)).collect());
    }

    /// Queue a poll on which nothing arrives.
    pub fn push_silence(&mut self) {
        self.batches.push_back(VecDeque::new());
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

impl LineTransport for MockTransport {
    type Error = &'static str;

    fn is_open(&self) -> bool {
        self.open
    }

    fn send_line(&mut self, line: &str) -> Result<(), &'static str> {
        if !self.open {
            return Err("closed");
        }
        self.sent.push(line.to_owned());
        Ok(())
    }

    fn recv_line(&mut self) -> Option<InboundLine> {
        let batch = self.batches.front_mut()?;
        match batch.pop_front() {
            Some(line) => Some(line),
            None => {
                self.batches.pop_front();
                None
            }
        }
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Shared settable clock; clones see the same time.
#[derive(Clone)]
pub struct MockClock {
    now: Rc<Cell<i64>>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}

// ── Delays ────────────────────────────────────────────────────

/// Counts requested delays without sleeping.
#[derive(Default)]
pub struct CountingDelay {
    pub calls: u32,
    pub total_ms: u64,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls += 1;
        self.total_ms += u64::from(ns) / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls += 1;
        self.total_ms += u64::from(ms);
    }
}

/// Really sleeps; for tests against a live socket.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

// ── Recorders ─────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<ClientEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &ClientEvent) {
        self.events.push(event.clone());
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub pages: Vec<StatusPage>,
}

#[allow(dead_code)]
impl RecordingDisplay {
    pub fn last(&self) -> &StatusPage {
        self.pages.last().expect("no page shown")
    }
}

impl DisplayPort for RecordingDisplay {
    fn show(&mut self, page: &StatusPage) {
        self.pages.push(page.clone());
    }
}

#[derive(Default)]
pub struct RecordingLed {
    pub modes: Vec<LedMode>,
}

impl IndicatorPort for RecordingLed {
    fn apply(&mut self, mode: LedMode) {
        self.modes.push(mode);
    }
}

// ── Fixtures ──────────────────────────────────────────────────

pub fn identity() -> MachineIdentity {
    MachineIdentity {
        hostname: "botwave-efcafe".into(),
        machine: "ESP32".into(),
        system: "v5.2.1".into(),
        release: "0.1.0".into(),
    }
}

pub type TestClient = BotWaveClient<MockTransport, MockClock>;

pub fn make_client(config: ClientConfig) -> (TestClient, MockClock) {
    let clock = MockClock::new(T0);
    let client = BotWaveClient::new(config, identity(), MockTransport::new(), clock.clone());
    (client, clock)
}

/// A client that has already completed the handshake.
#[allow(dead_code)]
pub fn registered_client() -> (TestClient, MockClock, RecordingSink) {
    let (mut client, clock) = make_client(ClientConfig::default());
    let mut sink = RecordingSink::default();
    client.transport_mut().push_batch(&["REGISTER_OK"]);
    assert!(client.connect(&mut CountingDelay::default(), &mut sink).is_success());
    client.transport_mut().sent.clear();
    (client, clock, sink)
}
