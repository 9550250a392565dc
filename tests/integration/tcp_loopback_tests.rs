//! End-to-end run over a real socket: the client talks to a scripted
//! server on 127.0.0.1 through `TcpLineTransport`.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use botwave_status::adapters::tcp_transport::TcpLineTransport;
use botwave_status::adapters::time::SystemClock;
use botwave_status::app::service::{BotWaveClient, RefreshOutcome};
use botwave_status::config::ClientConfig;
use botwave_status::protocol::channels::LineChannel;

use crate::mock_io::{RecordingDisplay, RecordingLed, RecordingSink, StdDelay, identity};

#[test]
fn register_ping_kick_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = thread::spawn(move || {
        let (sock, _) = listener.accept().unwrap();
        let mut writer = sock.try_clone().unwrap();
        let mut lines = BufReader::new(sock).lines();
        let mut received = Vec::new();

        // Handshake ends with VER.
        for line in lines.by_ref() {
            let line = line.unwrap();
            let done = line.starts_with("VER ");
            received.push(line);
            if done {
                break;
            }
        }
        writer.write_all(b"REGISTER_OK\nPING\n").unwrap();
        received.push(lines.next().unwrap().unwrap());

        writer.write_all(b"KICK reason='test over'\n").unwrap();
        // Wait for the client to hang up.
        for line in lines {
            if line.is_err() {
                break;
            }
        }
        received
    });

    let config = ClientConfig {
        server_port: port,
        ..ClientConfig::default()
    };
    let inbound: &'static LineChannel = Box::leak(Box::new(LineChannel::new()));
    let transport = TcpLineTransport::connect(&config.server_addr(), inbound).unwrap();
    let mut client = BotWaveClient::new(config, identity(), transport, SystemClock::new());

    let mut sink = RecordingSink::default();
    assert!(client.connect(&mut StdDelay, &mut sink).is_success());

    let mut display = RecordingDisplay::default();
    let mut led = RecordingLed::default();
    let mut outcome = RefreshOutcome::Running;
    for _ in 0..200 {
        outcome = client.refresh(&mut display, &mut led, &mut sink);
        if outcome == RefreshOutcome::Disconnected {
            break;
        }
        thread::sleep(Duration::from_millis(10));
    }

    assert_eq!(outcome, RefreshOutcome::Disconnected);
    assert_eq!(client.session().disconnect_reason(), "test over");
    assert_eq!(display.last().title, "DISCONNECTED");
    drop(client);

    let received = server.join().unwrap();
    assert!(received[0].starts_with("REGISTER hostname=botwave-efcafe "));
    assert_eq!(received[1], "VER 2.0.1");
    assert_eq!(received[2], "PONG");
}
