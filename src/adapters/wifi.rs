//! WiFi station-mode bring-up.
//!
//! Credentials are validated on every target; the blocking join itself
//! only exists with the `espidf` feature.  There is no reconnection: a
//! failed join shows the error page and the device waits for a reset.

use core::fmt;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WifiError {
    InvalidSsid,
    InvalidPassword,
    ConnectionFailed,
}

impl fmt::Display for WifiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)"),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
        }
    }
}

impl From<WifiError> for Error {
    fn from(e: WifiError) -> Self {
        match e {
            WifiError::InvalidSsid => Error::Network("invalid SSID"),
            WifiError::InvalidPassword => Error::Network("invalid WiFi password"),
            WifiError::ConnectionFailed => Error::Network("WiFi connection failed"),
        }
    }
}

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

pub fn validate_ssid(ssid: &str) -> Result<(), WifiError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(WifiError::InvalidSsid);
    }
    Ok(())
}

/// Empty means an open network.
pub fn validate_password(password: &str) -> Result<(), WifiError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(WifiError::InvalidPassword);
    }
    Ok(())
}

/// Join `ssid` with DHCP and block until the interface is up.
///
/// The returned driver must be kept alive for the connection to last.
#[cfg(feature = "espidf")]
pub fn connect(
    modem: esp_idf_hal::modem::Modem,
    sysloop: esp_idf_svc::eventloop::EspSystemEventLoop,
    nvs: esp_idf_svc::nvs::EspDefaultNvsPartition,
    ssid: &str,
    password: &str,
) -> Result<esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>, WifiError> {
    use esp_idf_svc::wifi::{AuthMethod, BlockingWifi, ClientConfiguration, Configuration, EspWifi};
    use log::{info, warn};

    validate_ssid(ssid)?;
    validate_password(password)?;

    let failed = |e: esp_idf_sys::EspError| {
        warn!("WiFi: {}", e);
        WifiError::ConnectionFailed
    };

    let driver = EspWifi::new(modem, sysloop.clone(), Some(nvs)).map_err(failed)?;
    let mut wifi = BlockingWifi::wrap(driver, sysloop).map_err(failed)?;

    let auth_method = if password.is_empty() { AuthMethod::None } else { AuthMethod::WPA2Personal };
    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: ssid.try_into().map_err(|_| WifiError::InvalidSsid)?,
        password: password.try_into().map_err(|_| WifiError::InvalidPassword)?,
        auth_method,
        ..Default::default()
    }))
    .map_err(failed)?;

    wifi.start().map_err(failed)?;
    info!("WiFi: joining '{}'", ssid);
    wifi.connect().map_err(failed)?;
    wifi.wait_netif_up().map_err(failed)?;

    match wifi.wifi().sta_netif().get_ip_info() {
        Ok(ip) => info!("WiFi: connected, ip={}", ip.ip),
        Err(e) => warn!("WiFi: connected, ip unknown: {}", e),
    }
    Ok(wifi)
}
