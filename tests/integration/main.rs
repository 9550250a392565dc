//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the client against mock
//! adapters (or a loopback socket).  All tests run on the host with no
//! real hardware required.

mod handshake_tests;
mod mock_io;
mod session_flow_tests;
mod tcp_loopback_tests;
