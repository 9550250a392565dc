//! Application core: client orchestration, zero direct I/O.
//!
//! [`service::BotWaveClient`] ties the protocol, session and broadcast
//! machines together.  All interaction with the network, the screen and
//! the LED happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
