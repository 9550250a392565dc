//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements      | Connects to                    |
//! |-----------------|-----------------|--------------------------------|
//! | `device_id`     | -               | eFuse MAC, IDF version         |
//! | `log_display`   | DisplayPort     | Serial log output              |
//! | `log_sink`      | EventSink       | Serial log output              |
//! | `status_led`    | IndicatorPort   | Any `OutputPin`                |
//! | `tcp_transport` | LineTransport   | Newline-delimited TCP (host)   |
//! | `time`          | Clock           | System wall clock              |
//! | `wifi`          | -               | ESP-IDF WiFi STA               |
//! | `ws_transport`  | LineTransport   | ESP-IDF WebSocket client       |

pub mod device_id;
pub mod log_display;
pub mod log_sink;
pub mod status_led;
pub mod tcp_transport;
pub mod time;
pub mod wifi;
#[cfg(feature = "espidf")]
pub mod ws_transport;
