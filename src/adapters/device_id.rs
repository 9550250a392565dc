//! Device identity reported with `REGISTER`.
//!
//! The default hostname is derived from the factory MAC address in the
//! form `botwave-xxyyzz` (last 3 bytes, lowercase hex), so it is stable
//! across reboots.  A non-empty `hostname` in the config overrides it.

use core::fmt::Write;

use crate::config::ClientConfig;
use crate::session::handshake::MachineIdentity;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

pub type HostnameString = heapless::String<24>;

/// Board name reported as `machine`.
#[cfg(feature = "espidf")]
pub const MACHINE: &str = "ESP32";
#[cfg(not(feature = "espidf"))]
pub const MACHINE: &str = std::env::consts::OS;

/// Read the factory MAC address from eFuse.
#[cfg(feature = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    unsafe {
        esp_idf_sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: returns a deterministic fake MAC.
#[cfg(not(feature = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0xDE, 0xAD, 0xBE, 0xEF, 0xCA, 0xFE]
}

/// Platform firmware version reported as `system`.
#[cfg(feature = "espidf")]
pub fn system_version() -> String {
    let version = unsafe { core::ffi::CStr::from_ptr(esp_idf_sys::esp_get_idf_version()) };
    version.to_string_lossy().into_owned()
}

#[cfg(not(feature = "espidf"))]
pub fn system_version() -> String {
    format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
}

/// Format: `botwave-xxyyzz`.
pub fn hostname(mac: &MacAddress) -> HostnameString {
    let mut name = HostnameString::new();
    let _ = write!(name, "botwave-{:02x}{:02x}{:02x}", mac[3], mac[4], mac[5]);
    name
}

/// Assemble the identity for this device.
pub fn machine_identity(config: &ClientConfig, mac: &MacAddress) -> MachineIdentity {
    let hostname = if config.hostname.is_empty() {
        String::from(hostname(mac).as_str())
    } else {
        config.hostname.clone()
    };

    MachineIdentity {
        hostname,
        machine: String::from(MACHINE),
        system: system_version(),
        release: String::from(env!("CARGO_PKG_VERSION")),
    }
}
