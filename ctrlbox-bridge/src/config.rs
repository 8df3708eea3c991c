//! Bridge configuration
//!
//! Values come from built-in defaults, optionally overlaid by a TOML file,
//! then by command-line arguments.
//!
//! ```toml
//! osc_host = "127.0.0.1"
//! osc_port = 57120
//! device = "/dev/ttyUSB0"
//! baud_rate = 500000
//! verbose = false
//! ```

use std::fs;
use std::path::Path;

use ctrlbox_hal::uart::{UartConfig, DEFAULT_BAUDRATE};
use log::debug;
use serde::Deserialize;

use crate::error::BridgeError;

/// Default OSC destination port (SuperCollider's language port)
pub const DEFAULT_OSC_PORT: u16 = 57120;

pub const DEFAULT_OSC_HOST: &str = "127.0.0.1";

/// Serial device used when none is given
pub fn default_device() -> &'static str {
    if cfg!(target_os = "windows") {
        "COM3"
    } else if cfg!(target_os = "macos") {
        "/dev/cu.usbserial"
    } else {
        "/dev/ttyUSB0"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Host the OSC messages are sent to
    pub osc_host: String,
    /// UDP port the OSC messages are sent to
    pub osc_port: u16,
    /// Serial device path
    pub device: String,
    /// Link rate; must match the firmware
    pub baud_rate: u32,
    /// Log every decoded event
    pub verbose: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            osc_host: DEFAULT_OSC_HOST.to_string(),
            osc_port: DEFAULT_OSC_PORT,
            device: default_device().to_string(),
            baud_rate: DEFAULT_BAUDRATE,
            verbose: false,
        }
    }
}

impl BridgeConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, BridgeError> {
        let text = fs::read_to_string(path).map_err(|e| BridgeError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_toml_str(&text).map_err(|e| BridgeError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// `host:port` of the OSC destination
    pub fn osc_target(&self) -> String {
        format!("{}:{}", self.osc_host, self.osc_port)
    }

    /// Serial line settings (always 8N1)
    pub fn uart_config(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baud_rate)
    }

    /// Log a summary of the effective configuration
    pub fn log_summary(&self) {
        debug!("Configuration:");
        debug!("  device {} @ {} baud", self.device, self.baud_rate);
        debug!("  osc target {}", self.osc_target());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BridgeConfig::default();
        assert_eq!(config.osc_port, 57120);
        assert_eq!(config.baud_rate, 500_000);
        assert_eq!(config.device, default_device());
        assert!(!config.verbose);
        assert_eq!(config.osc_target(), "127.0.0.1:57120");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BridgeConfig::from_toml_str("osc_port = 9000\nverbose = true\n").unwrap();
        assert_eq!(config.osc_port, 9000);
        assert!(config.verbose);
        assert_eq!(config.baud_rate, DEFAULT_BAUDRATE);
        assert_eq!(config.osc_host, DEFAULT_OSC_HOST);
    }

    #[test]
    fn test_full_toml() {
        let text = r#"
            osc_host = "192.168.1.20"
            osc_port = 8000
            device = "/dev/ttyACM1"
            baud_rate = 115200
            verbose = false
        "#;
        let config = BridgeConfig::from_toml_str(text).unwrap();
        assert_eq!(config.osc_target(), "192.168.1.20:8000");
        assert_eq!(config.device, "/dev/ttyACM1");
        assert_eq!(config.uart_config().baudrate, 115_200);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(BridgeConfig::from_toml_str("baudrate = 9600").is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = BridgeConfig::load(Path::new("/nonexistent/ctrlbox.toml"));
        assert!(matches!(result, Err(BridgeError::Config { .. })));
    }
}
