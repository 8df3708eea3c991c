//! Bridge error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// The serial device could not be opened or configured
    #[error("could not open serial device {device}: {source}")]
    Open {
        device: String,
        #[source]
        source: serialport::Error,
    },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// OSC encoding or UDP setup failed
    #[error("osc: {0}")]
    Osc(String),

    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },
}
