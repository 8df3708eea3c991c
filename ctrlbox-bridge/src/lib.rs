//! ctrlbox host bridge
//!
//! Reads the ctrlbox serial stream, decodes it with [`ctrlbox_protocol`],
//! and republishes every event as an OSC message over UDP.

pub mod bridge;
pub mod config;
pub mod error;
pub mod osc;
pub mod serial;

pub use bridge::Bridge;
pub use config::{BridgeConfig, DEFAULT_OSC_HOST, DEFAULT_OSC_PORT};
pub use error::BridgeError;
pub use osc::{OscPublisher, Publisher, OSC_PREFIX};
pub use serial::SerialDevice;
