//! Client service: the hexagonal core.
//!
//! [`BotWaveClient`] owns the session and broadcast state machines, the
//! transport and the clock.  Display, LED and event sink are injected at
//! call sites, so the whole client runs against mock adapters in tests.
//!
//! ```text
//!  LineTransport ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                    │      BotWaveClient     │
//!          Clock ──▶ │ Session · Broadcast    │ ──▶ DisplayPort
//!                    └────────────────────────┘ ──▶ IndicatorPort
//! ```

use std::time::Instant;

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::broadcast::{BroadcastState, BroadcastStatus};
use crate::config::ClientConfig;
use crate::dashboard;
use crate::dispatch::dispatch;
use crate::protocol::decode;
use crate::protocol::transport::LineTransport;
use crate::session::handshake::{
    HandshakeOutcome, HandshakePolicy, MachineIdentity, PollStatus, handshake_lines,
    wait_for_registration,
};
use crate::session::{SessionPhase, SessionState};

use super::events::ClientEvent;
use super::ports::{Clock, DisplayPort, EventSink, IndicatorPort};

/// Result of one refresh step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Still connected; call again after the refresh interval.
    Running,
    /// The session is over.  The disconnected page has been shown.
    Disconnected,
}

// ───────────────────────────────────────────────────────────────
// BotWaveClient
// ───────────────────────────────────────────────────────────────

pub struct BotWaveClient<T: LineTransport, C: Clock> {
    config: ClientConfig,
    identity: MachineIdentity,
    transport: T,
    clock: C,
    session: SessionState,
    broadcast: BroadcastState,
    lines_handled: u64,
}

impl<T: LineTransport, C: Clock> BotWaveClient<T, C> {
    pub fn new(config: ClientConfig, identity: MachineIdentity, transport: T, clock: C) -> Self {
        Self {
            config,
            identity,
            transport,
            clock,
            session: SessionState::new(),
            broadcast: BroadcastState::new(),
            lines_handled: 0,
        }
    }

    // ── Handshake ─────────────────────────────────────────────

    /// Send the registration handshake and wait for the server's verdict.
    ///
    /// Inbound lines are dispatched on every poll, so `PING` and friends
    /// are answered while waiting.  Success requires `REGISTER_OK` *and*
    /// an open transport.
    pub fn connect(&mut self, delay: &mut impl DelayNs, sink: &mut impl EventSink) -> HandshakeOutcome {
        let from = self.session.phase();
        if !self.session.begin_handshake() {
            return HandshakeOutcome::Rejected { attempts: 0 };
        }
        sink.emit(&ClientEvent::PhaseChanged {
            from,
            to: self.session.phase(),
        });

        for line in handshake_lines(&self.config, &self.identity) {
            self.send(&line);
        }

        let policy = HandshakePolicy::from_config(&self.config);
        let outcome = wait_for_registration(policy, delay, || {
            self.poll_inbound(sink);
            if self.session.is_kicked() {
                PollStatus::Rejected
            } else if self.session.is_registered() && self.transport.is_open() {
                PollStatus::Registered
            } else {
                PollStatus::Pending
            }
        });

        if outcome.is_success() {
            self.session.confirm_connected();
            info!(
                "client: connected to {}:{} as {}",
                self.config.server_host, self.config.server_port, self.identity.hostname
            );
        } else {
            warn!("client: handshake failed: {}", self.session.disconnect_reason());
        }
        sink.emit(&ClientEvent::HandshakeFinished(outcome));
        outcome
    }

    // ── Inbound ───────────────────────────────────────────────

    /// Decode, dispatch and answer one received line.
    pub fn handle_line(&mut self, line: &str, sink: &mut impl EventSink) {
        let phase = self.session.phase();
        let status = self.broadcast.status();

        let started = Instant::now();
        let command = decode(line);
        let decoded = started.elapsed();
        let reply = dispatch(&command, &mut self.session, &mut self.broadcast, self.clock.now_ms());
        self.lines_handled += 1;

        if self.config.debug_timer {
            debug!(
                "{}: decoded in {} us, handled in {} us",
                command.name,
                decoded.as_micros(),
                started.elapsed().saturating_sub(decoded).as_micros()
            );
        }

        if let Some(reply) = reply {
            self.send(&reply);
        }

        self.emit_changes(phase, status, sink);
    }

    /// Drain every line the transport has queued.  Returns how many were handled.
    pub fn poll_inbound(&mut self, sink: &mut impl EventSink) -> usize {
        let mut handled = 0;
        while let Some(line) = self.transport.recv_line() {
            self.handle_line(&line, sink);
            handled += 1;
        }
        handled
    }

    /// Start a planned broadcast whose time has come.
    pub fn check_planned_broadcast(&mut self, sink: &mut impl EventSink) -> bool {
        let status = self.broadcast.status();
        let started = self.broadcast.check_planned(self.clock.now_ms());
        if started {
            sink.emit(&ClientEvent::BroadcastChanged {
                from: status,
                to: self.broadcast.status(),
            });
        }
        started
    }

    // ── Outbound ──────────────────────────────────────────────

    /// Send one line.  Refused (and logged) while the transport is down.
    pub fn send(&mut self, line: &str) -> bool {
        if !self.transport.is_open() {
            warn!("cannot send: client is disconnected");
            return false;
        }
        match self.transport.send_line(line) {
            Ok(()) => {
                info!(">>> Sent: {}", line);
                true
            }
            Err(e) => {
                warn!("send failed: {:?}", e);
                false
            }
        }
    }

    // ── Refresh loop ──────────────────────────────────────────

    /// One dashboard step: drain inbound lines, start due broadcasts,
    /// redraw the page and drive the LED.
    ///
    /// Once the session is no longer connected the disconnected page is
    /// shown, the LED switched off, and [`RefreshOutcome::Disconnected`]
    /// returned.
    pub fn refresh(
        &mut self,
        display: &mut impl DisplayPort,
        indicator: &mut impl IndicatorPort,
        sink: &mut impl EventSink,
    ) -> RefreshOutcome {
        let started_ms = self.clock.now_ms();

        self.poll_inbound(sink);

        if !self.is_connected() {
            let reason = self.session.disconnect_reason();
            info!("client: disconnected: {}", reason);
            display.show(&dashboard::disconnected_page(reason));
            indicator.apply(dashboard::LedMode::Off);
            sink.emit(&ClientEvent::Disconnected {
                reason: String::from(reason),
            });
            return RefreshOutcome::Disconnected;
        }

        self.check_planned_broadcast(sink);

        let view = dashboard::render(&self.broadcast, self.clock.now_ms());
        display.show(&view.page);
        indicator.apply(view.led);

        if self.config.debug_timer {
            debug!(
                "refresh took {} ms ({} lines handled so far)",
                self.clock.now_ms() - started_ms,
                self.lines_handled
            );
        }
        RefreshOutcome::Running
    }

    // ── Queries ───────────────────────────────────────────────

    /// Open transport and a registered session.
    pub fn is_connected(&self) -> bool {
        self.transport.is_open() && self.session.is_registered()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn broadcast(&self) -> &BroadcastState {
        &self.broadcast
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Lines dispatched since startup.
    pub fn lines_handled(&self) -> u64 {
        self.lines_handled
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_changes(&self, phase: SessionPhase, status: BroadcastStatus, sink: &mut impl EventSink) {
        if self.session.phase() != phase {
            sink.emit(&ClientEvent::PhaseChanged {
                from: phase,
                to: self.session.phase(),
            });
        }
        if self.broadcast.status() != status {
            sink.emit(&ClientEvent::BroadcastChanged {
                from: status,
                to: self.broadcast.status(),
            });
        }
    }
}
