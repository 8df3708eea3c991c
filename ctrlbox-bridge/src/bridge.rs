//! Serial to OSC read loop
//!
//! Reads one byte at a time, feeds the decoder, and publishes each decoded
//! packet. The loop ends when the device disconnects; there is no retry or
//! reconnect.

use std::fmt::Display;

use ctrlbox_hal::UartRx;
use ctrlbox_protocol::{Decoder, DecoderStats, Packet};
use log::{debug, info, warn};

use crate::osc::Publisher;

pub struct Bridge<R, P> {
    rx: R,
    publisher: P,
    decoder: Decoder,
}

impl<R, P> Bridge<R, P>
where
    R: UartRx,
    R::Error: Display,
    P: Publisher,
{
    pub fn new(rx: R, publisher: P) -> Self {
        Self {
            rx,
            publisher,
            decoder: Decoder::new(),
        }
    }

    pub fn stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    /// Run until the device disconnects
    ///
    /// End of stream and read errors both count as a disconnect.
    pub fn run(&mut self) -> DecoderStats {
        loop {
            match self.rx.read_byte() {
                Ok(Some(byte)) => {
                    self.handle_byte(byte);
                }
                Ok(None) => {
                    info!("ctrlbox: device disconnected");
                    break;
                }
                Err(e) => {
                    info!("ctrlbox: device disconnected ({})", e);
                    break;
                }
            }
        }
        self.decoder.stats()
    }

    /// Feed one received byte; publishes and returns the packet it completes
    pub fn handle_byte(&mut self, byte: u8) -> Option<Packet> {
        let packet = self.decoder.feed(byte)?;
        log_event(&packet);

        if let Err(e) = self.publisher.publish(&packet) {
            warn!("Failed to publish {:?}: {}", packet, e);
        }
        Some(packet)
    }

    pub fn into_parts(self) -> (R, P) {
        (self.rx, self.publisher)
    }
}

fn log_event(packet: &Packet) {
    match *packet {
        Packet::Analog { channel, value } => {
            debug!("analog ch {:02} val {:04}", u16::from(channel) + 1, value)
        }
        Packet::Digital { channel, value } => {
            debug!("digital ch {:02} val {}", u16::from(channel) + 1, value)
        }
    }
}
