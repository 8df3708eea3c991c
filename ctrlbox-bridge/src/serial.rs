//! Host serial device
//!
//! Opens the control surface's USB serial adapter in raw 8N1 mode and
//! exposes it as a blocking [`UartRx`].

use std::io::{self, Read};
use std::time::Duration;

use ctrlbox_hal::uart::{self, UartConfig, UartRx};
use serialport::{FlowControl, SerialPort};

use crate::error::BridgeError;

/// How long a single driver read may wait before it is retried
///
/// A timeout is not a disconnect; the bridge keeps waiting for bytes.
const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// An open serial device
pub struct SerialDevice {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialDevice {
    /// Open and configure `device`
    pub fn open(device: &str, config: &UartConfig) -> Result<Self, BridgeError> {
        let port = serialport::new(device, config.baudrate)
            .data_bits(data_bits(config.data_bits))
            .parity(parity(config.parity))
            .stop_bits(stop_bits(config.stop_bits))
            .flow_control(FlowControl::None)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|source| BridgeError::Open {
                device: device.to_string(),
                source,
            })?;

        Ok(Self {
            port,
            name: device.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl UartRx for SerialDevice {
    type Error = io::Error;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        read_retrying(&mut self.port, buf)
    }
}

/// Read until at least one byte arrives, the stream ends, or a real error
fn read_retrying<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::Interrupted) => {
                continue
            }
            result => return result,
        }
    }
}

fn data_bits(bits: uart::DataBits) -> serialport::DataBits {
    match bits {
        uart::DataBits::Seven => serialport::DataBits::Seven,
        uart::DataBits::Eight => serialport::DataBits::Eight,
    }
}

fn parity(parity: uart::Parity) -> serialport::Parity {
    match parity {
        uart::Parity::None => serialport::Parity::None,
        uart::Parity::Even => serialport::Parity::Even,
        uart::Parity::Odd => serialport::Parity::Odd,
    }
}

fn stop_bits(bits: uart::StopBits) -> serialport::StopBits {
    match bits {
        uart::StopBits::One => serialport::StopBits::One,
        uart::StopBits::Two => serialport::StopBits::Two,
    }
}
