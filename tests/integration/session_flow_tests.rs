//! Registered-session flows: server commands in, replies out, dashboard
//! pages and LED driven by the refresh loop.

use botwave_status::app::events::ClientEvent;
use botwave_status::app::service::RefreshOutcome;
use botwave_status::broadcast::BroadcastStatus;
use botwave_status::dashboard::LedMode;
use botwave_status::protocol::decode_response;
use botwave_status::session::{REASON_CONNECTION_LOST, REASON_KICKED};

use crate::mock_io::{RecordingDisplay, RecordingLed, T0, registered_client};

#[test]
fn idle_dashboard_after_registration() {
    let (mut client, _clock, mut sink) = registered_client();
    let mut display = RecordingDisplay::default();
    let mut led = RecordingLed::default();

    assert_eq!(client.refresh(&mut display, &mut led, &mut sink), RefreshOutcome::Running);
    assert_eq!(display.last().title, "CONNECTED");
    assert_eq!(display.last().body, "No active broadcast.");
    assert_eq!(led.modes, [LedMode::Off]);
}

#[test]
fn planned_broadcast_counts_down_then_plays() {
    let (mut client, clock, mut sink) = registered_client();
    let mut display = RecordingDisplay::default();
    let mut led = RecordingLed::default();

    let start_at = format!(
        "START ps=Morning rt='Wake up' filename=show.mp3 frequency=100.5 start_at={}",
        T0 / 1000 + 90
    );
    client.transport_mut().push_batch(&[start_at.as_str()]);

    client.refresh(&mut display, &mut led, &mut sink);
    assert_eq!(client.transport().sent, ["OK message='Start acknowledged'"]);
    assert_eq!(display.last().title, "PLANNED BROADCAST");
    assert_eq!(display.last().body, "Starts in: 1m 30s\nPS: Morning");
    assert_eq!(display.last().progress, Some(0));

    clock.advance_ms(60_000);
    client.refresh(&mut display, &mut led, &mut sink);
    assert_eq!(display.last().body, "Starts in: 0m 30s\nPS: Morning");
    assert_eq!(display.last().progress, Some(50));
    assert_eq!(led.modes, [LedMode::Blink, LedMode::Blink]);

    clock.advance_ms(30_000);
    client.refresh(&mut display, &mut led, &mut sink);
    assert_eq!(client.broadcast().status(), BroadcastStatus::Playing);
    assert_eq!(display.last().title, "PLAYING 100.5MHz");
    assert_eq!(display.last().body, "PS: Morning\nRT: Wake up\nFile: show.mp3");
    assert_eq!(led.modes.last(), Some(&LedMode::On));

    assert!(sink.events.contains(&ClientEvent::BroadcastChanged {
        from: BroadcastStatus::Stopped,
        to: BroadcastStatus::Planned,
    }));
    assert!(sink.events.contains(&ClientEvent::BroadcastChanged {
        from: BroadcastStatus::Planned,
        to: BroadcastStatus::Playing,
    }));
}

#[test]
fn live_stream_then_stop() {
    let (mut client, _clock, mut sink) = registered_client();
    let mut display = RecordingDisplay::default();
    let mut led = RecordingLed::default();

    client
        .transport_mut()
        .push_batch(&["STREAM_TOKEN ps=Live rt='On air' frequency=101.1"]);
    client.refresh(&mut display, &mut led, &mut sink);
    assert_eq!(display.last().title, "LIVE 101.1MHz");
    assert_eq!(display.last().body, "PS: Live\nRT: On air");

    client.transport_mut().push_batch(&["STOP"]);
    client.refresh(&mut display, &mut led, &mut sink);
    assert_eq!(display.last().title, "CONNECTED");
    assert_eq!(led.modes, [LedMode::On, LedMode::Off]);
    assert_eq!(
        client.transport().sent,
        ["OK message='Live acknowledged'", "OK message='Stop acknowledged'"]
    );
}

#[test]
fn replies_keep_arrival_order() {
    let (mut client, _clock, mut sink) = registered_client();
    client
        .transport_mut()
        .push_batch(&["PING", "LIST_FILES", "REMOVE_FILE a.mp3", "", "ping"]);

    assert_eq!(client.poll_inbound(&mut sink), 5);

    let sent = &client.transport().sent;
    assert_eq!(sent.len(), 4);
    assert_eq!(sent[0], "PONG");
    assert_eq!(sent[1], "OK files={}");
    let (status, message) = decode_response(&sent[2]);
    assert_eq!(status, "ERROR");
    assert_eq!(message, "The command REMOVE_FILE is not implemented :/");
    assert_eq!(sent[3], "PONG");
}

#[test]
fn kick_ends_session_and_silences_client() {
    let (mut client, _clock, mut sink) = registered_client();
    let mut display = RecordingDisplay::default();
    let mut led = RecordingLed::default();

    client.transport_mut().push_batch(&["KICK", "PING"]);
    assert_eq!(
        client.refresh(&mut display, &mut led, &mut sink),
        RefreshOutcome::Disconnected
    );
    assert!(client.transport().sent.is_empty());
    assert_eq!(display.last().title, "DISCONNECTED");
    assert_eq!(display.last().body, REASON_KICKED);
    assert_eq!(led.modes, [LedMode::Off]);
    assert_eq!(
        sink.events.last(),
        Some(&ClientEvent::Disconnected {
            reason: REASON_KICKED.into()
        })
    );
}

#[test]
fn dropped_connection_reports_lost() {
    let (mut client, _clock, mut sink) = registered_client();
    let mut display = RecordingDisplay::default();
    let mut led = RecordingLed::default();

    client.refresh(&mut display, &mut led, &mut sink);
    client.transport_mut().close();

    assert!(!client.is_connected());
    assert!(!client.send("PONG"));
    assert_eq!(
        client.refresh(&mut display, &mut led, &mut sink),
        RefreshOutcome::Disconnected
    );
    assert_eq!(display.last().body, REASON_CONNECTION_LOST);
}

#[test]
fn malformed_start_time_plays_immediately() {
    let (mut client, _clock, mut sink) = registered_client();
    let mut display = RecordingDisplay::default();
    let mut led = RecordingLed::default();

    client.transport_mut().push_batch(&["START filename=x.mp3 start_at=tomorrow"]);
    client.refresh(&mut display, &mut led, &mut sink);

    assert_eq!(client.broadcast().status(), BroadcastStatus::Playing);
    assert_eq!(display.last().title, "PLAYING 90.0MHz");
    assert_eq!(client.broadcast().ps(), "Unknown");
}
