//! Fuzz target: line decode + dispatch
//!
//! Feeds arbitrary bytes, split into lines, through the decoder and the
//! dispatcher.  Neither may panic, and every reply must be a single line.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use botwave_status::broadcast::BroadcastState;
use botwave_status::dispatch::dispatch;
use botwave_status::protocol::{decode, decode_response};
use botwave_status::session::SessionState;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let mut session = SessionState::new();
    session.begin_handshake();
    let mut broadcast = BroadcastState::new();

    for line in text.split('\n') {
        let command = decode(line);
        // Re-encoding a decoded command must decode without panicking too.
        let _ = decode(&command.to_line());

        if let Some(reply) = dispatch(&command, &mut session, &mut broadcast, 1_700_000_000_000) {
            assert!(!reply.contains('\n'), "reply spans lines");
            let (status, _) = decode_response(&reply);
            assert!(!status.is_empty(), "reply without status");
        }
        broadcast.check_planned(1_700_000_000_000);
    }
});
