//! Buffered UART link
//!
//! Pairs an inbound and an outbound [`RingBuffer`]. The interrupt side
//! feeds received bytes in and drains bytes to transmit; the foreground
//! side reads, writes and sends packets.
//!
//! The two directions treat a full ring differently:
//! - receive is lossy: a byte that arrives while the inbound ring is full
//!   is dropped, because an interrupt handler cannot wait
//! - transmit blocks: the foreground spins until the interrupt has moved
//!   a byte out, so nothing the firmware chose to send is lost

use ctrlbox_hal::UartTx;
use ctrlbox_protocol::Packet;

use crate::ring::{RingBuffer, RX_BUFFER_SIZE, TX_BUFFER_SIZE};

/// Link with the firmware's ring sizes
pub type UartLink = SerialLink<RX_BUFFER_SIZE, TX_BUFFER_SIZE>;

/// Both directions of a buffered serial link
pub struct SerialLink<const RX: usize, const TX: usize> {
    rx: RingBuffer<RX>,
    tx: RingBuffer<TX>,
}

impl<const RX: usize, const TX: usize> Default for SerialLink<RX, TX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RX: usize, const TX: usize> SerialLink<RX, TX> {
    pub const fn new() -> Self {
        Self {
            rx: RingBuffer::new(),
            tx: RingBuffer::new(),
        }
    }

    // Interrupt side

    /// Receive-complete handler: store one received byte
    ///
    /// Returns `false` if the byte was dropped because the inbound ring is
    /// full.
    pub fn on_receive(&self, byte: u8) -> bool {
        self.rx.push(byte)
    }

    /// Transmit-ready handler: next byte to put on the wire
    ///
    /// `None` means the outbound ring has drained and the transmit
    /// interrupt can be disabled until the next write.
    pub fn on_transmit_ready(&self) -> Option<u8> {
        self.tx.pop()
    }

    // Foreground side

    /// Read the oldest received byte
    pub fn read(&self) -> Option<u8> {
        self.rx.pop()
    }

    /// Number of received bytes waiting to be read
    pub fn available(&self) -> usize {
        self.rx.available()
    }

    /// Discard all received bytes that have not been read
    pub fn flush(&self) {
        self.rx.flush();
    }

    /// Queue one byte for transmission, waiting for space if needed
    pub fn write(&self, byte: u8) {
        self.tx.push_blocking(byte);
    }

    /// Encode `packet` and queue it for transmission
    ///
    /// Blocks for as long as the outbound ring stays full.
    pub fn send(&self, packet: &Packet) {
        for byte in packet.encode_to_vec() {
            self.write(byte);
        }
    }

    /// Returns true if every queued byte has been handed to the UART
    pub fn tx_idle(&self) -> bool {
        self.tx.is_empty()
    }

    /// Bytes queued for transmission
    pub fn tx_pending(&self) -> usize {
        self.tx.available()
    }

    /// Move every queued byte to `uart`
    ///
    /// Stands in for the transmit interrupt on targets that poll the UART.
    /// Returns the number of bytes written.
    pub fn drain_to<U: UartTx>(&self, uart: &mut U) -> Result<usize, U::Error> {
        let mut written = 0;
        while let Some(byte) = self.on_transmit_ready() {
            uart.write_blocking(&[byte])?;
            written += 1;
        }
        if written > 0 {
            uart.flush()?;
        }
        Ok(written)
    }
}
