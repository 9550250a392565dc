//! BotWave status client library.
//!
//! Exposes the protocol, session and broadcast logic for the firmware
//! binary and for host-side integration testing.  ESP-IDF-specific code
//! is guarded by `#[cfg(feature = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod broadcast;
pub mod config;
pub mod dashboard;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod session;
