//! Handshake: REGISTER / AUTH / VER, then polling for the verdict.

use botwave_status::app::events::ClientEvent;
use botwave_status::config::ClientConfig;
use botwave_status::dashboard;
use botwave_status::session::handshake::HandshakeOutcome;
use botwave_status::session::{
    REASON_AUTH_FAILED, REASON_CONNECTION_LOST, REASON_TIMEOUT, REASON_VERSION_MISMATCH,
    SessionPhase,
};

use crate::mock_io::{CountingDelay, RecordingSink, make_client};

#[test]
fn registers_on_third_poll() {
    let (mut client, _clock) = make_client(ClientConfig::default());
    let mut delay = CountingDelay::default();
    let mut sink = RecordingSink::default();

    let t = client.transport_mut();
    t.push_silence();
    t.push_silence();
    t.push_batch(&["REGISTER_OK"]);

    let outcome = client.connect(&mut delay, &mut sink);

    assert_eq!(outcome, HandshakeOutcome::Registered { attempts: 3 });
    assert_eq!(delay.calls, 2);
    assert_eq!(delay.total_ms, 200);
    assert!(client.is_connected());
    assert_eq!(client.session().disconnect_reason(), REASON_CONNECTION_LOST);
    assert_eq!(
        sink.events.last(),
        Some(&ClientEvent::HandshakeFinished(outcome))
    );
}

#[test]
fn handshake_lines_in_order_without_passkey() {
    let (mut client, _clock) = make_client(ClientConfig::default());
    client.transport_mut().push_batch(&["REGISTER_OK"]);
    client.connect(&mut CountingDelay::default(), &mut RecordingSink::default());

    assert_eq!(
        client.transport().sent,
        [
            "REGISTER hostname=botwave-efcafe machine=ESP32 system=v5.2.1 release=0.1.0",
            "VER 2.0.1",
        ]
    );
}

#[test]
fn auth_sent_when_passkey_configured() {
    let config = ClientConfig {
        passkey: "s3cret".into(),
        ..ClientConfig::default()
    };
    let (mut client, _clock) = make_client(config);
    client.transport_mut().push_batch(&["REGISTER_OK"]);
    client.connect(&mut CountingDelay::default(), &mut RecordingSink::default());

    let sent = &client.transport().sent;
    assert_eq!(sent.len(), 3);
    assert!(sent[0].starts_with("REGISTER "));
    assert_eq!(sent[1], "AUTH s3cret");
    assert_eq!(sent[2], "VER 2.0.1");
}

#[test]
fn auth_failed_ends_wait_early() {
    let (mut client, _clock) = make_client(ClientConfig::default());
    let mut delay = CountingDelay::default();
    client.transport_mut().push_silence();
    client.transport_mut().push_batch(&["AUTH_FAILED"]);

    let outcome = client.connect(&mut delay, &mut RecordingSink::default());

    assert_eq!(outcome, HandshakeOutcome::Rejected { attempts: 2 });
    assert_eq!(delay.calls, 1);
    assert_eq!(client.session().phase(), SessionPhase::Kicked);
    assert_eq!(client.session().disconnect_reason(), REASON_AUTH_FAILED);

    let page = dashboard::timeout_page(client.session().disconnect_reason());
    assert_eq!(page.title, "TIMEOUT");
    assert_eq!(page.body, "Incorrect passkey.");
}

#[test]
fn version_mismatch_rejects() {
    let (mut client, _clock) = make_client(ClientConfig::default());
    client.transport_mut().push_batch(&["VERSION_MISMATCH"]);
    let outcome = client.connect(&mut CountingDelay::default(), &mut RecordingSink::default());
    assert!(!outcome.is_success());
    assert_eq!(client.session().disconnect_reason(), REASON_VERSION_MISMATCH);
}

#[test]
fn silence_times_out_after_budget() {
    let (mut client, _clock) = make_client(ClientConfig::default());
    let mut delay = CountingDelay::default();

    let outcome = client.connect(&mut delay, &mut RecordingSink::default());

    assert_eq!(outcome, HandshakeOutcome::TimedOut);
    assert_eq!(delay.calls, 50);
    assert_eq!(delay.total_ms, 5_000);
    assert_eq!(client.session().phase(), SessionPhase::Handshaking);
    assert_eq!(client.session().disconnect_reason(), REASON_TIMEOUT);
}

#[test]
fn ping_during_handshake_is_answered() {
    let (mut client, _clock) = make_client(ClientConfig::default());
    client.transport_mut().push_batch(&["PING"]);
    client.transport_mut().push_batch(&["REGISTER_OK"]);

    let outcome = client.connect(&mut CountingDelay::default(), &mut RecordingSink::default());

    assert_eq!(outcome, HandshakeOutcome::Registered { attempts: 2 });
    assert_eq!(client.transport().sent.last().map(String::as_str), Some("PONG"));
}

#[test]
fn closed_transport_never_registers() {
    let config = ClientConfig {
        handshake_max_attempts: 3,
        ..ClientConfig::default()
    };
    let (mut client, _clock) = make_client(config);
    client.transport_mut().close();
    client.transport_mut().push_batch(&["REGISTER_OK"]);

    let outcome = client.connect(&mut CountingDelay::default(), &mut RecordingSink::default());

    assert_eq!(outcome, HandshakeOutcome::TimedOut);
    assert!(client.transport().sent.is_empty());
    assert!(!client.is_connected());
    assert_eq!(client.session().disconnect_reason(), REASON_TIMEOUT);
}

#[test]
fn second_connect_is_refused() {
    let (mut client, _clock) = make_client(ClientConfig::default());
    client.transport_mut().push_batch(&["REGISTER_OK"]);
    client.connect(&mut CountingDelay::default(), &mut RecordingSink::default());
    let sent_before = client.transport().sent.len();

    let again = client.connect(&mut CountingDelay::default(), &mut RecordingSink::default());
    assert!(!again.is_success());
    assert_eq!(client.transport().sent.len(), sent_before);
    assert!(client.is_connected());
}
