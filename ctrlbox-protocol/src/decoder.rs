//! Byte-at-a-time packet decoder.
//!
//! Any byte with bit 7 set starts a new packet, whatever the decoder was
//! doing. Payload bytes that arrive when no packet is open are skipped.
//! Malformed input therefore never produces an error; at worst one packet
//! is lost or misattributed and decoding resumes at the next header.

use crate::packet::{Packet, CHANNEL_MASK, HEADER_DIGITAL, HEADER_START, PAYLOAD_MASK};

/// Where the decoder is inside a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
    /// Waiting for a header byte
    Idle,
    /// Got an analog header, waiting for the high 7 bits
    AwaitAnalogHigh { channel: u8 },
    /// Got the high bits, waiting for the low 7 bits
    AwaitAnalogLow { channel: u8, high: u16 },
    /// Got a digital header, waiting for the value byte
    AwaitDigitalValue { channel: u8 },
}

/// Counters describing the health of the incoming stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderStats {
    /// Packets decoded
    pub packets: u32,
    /// Payload bytes skipped while idle
    pub discarded: u32,
    /// Packets cut short by a new header
    pub aborted: u32,
}

/// State machine for decoding incoming packets
#[derive(Debug, Clone)]
pub struct Decoder {
    state: DecoderState,
    stats: DecoderStats,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Create a new decoder
    pub const fn new() -> Self {
        Self {
            state: DecoderState::Idle,
            stats: DecoderStats {
                packets: 0,
                discarded: 0,
                aborted: 0,
            },
        }
    }

    /// Current position inside a packet
    pub fn state(&self) -> DecoderState {
        self.state
    }

    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Drop any partially received packet
    pub fn reset(&mut self) {
        self.state = DecoderState::Idle;
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Some(packet)` when the byte completes a packet.
    pub fn feed(&mut self, byte: u8) -> Option<Packet> {
        if byte & HEADER_START != 0 {
            if self.state != DecoderState::Idle {
                self.stats.aborted = self.stats.aborted.wrapping_add(1);
            }
            let channel = byte & CHANNEL_MASK;
            self.state = if byte & HEADER_DIGITAL != 0 {
                DecoderState::AwaitDigitalValue { channel }
            } else {
                DecoderState::AwaitAnalogHigh { channel }
            };
            return None;
        }

        match self.state {
            DecoderState::Idle => {
                self.stats.discarded = self.stats.discarded.wrapping_add(1);
                None
            }
            DecoderState::AwaitAnalogHigh { channel } => {
                self.state = DecoderState::AwaitAnalogLow {
                    channel,
                    high: u16::from(byte) << 7,
                };
                None
            }
            DecoderState::AwaitAnalogLow { channel, high } => {
                self.state = DecoderState::Idle;
                let value = high | u16::from(byte & PAYLOAD_MASK);
                self.complete(Packet::Analog { channel, value })
            }
            DecoderState::AwaitDigitalValue { channel } => {
                self.state = DecoderState::Idle;
                self.complete(Packet::Digital {
                    channel,
                    value: byte,
                })
            }
        }
    }

    fn complete(&mut self, packet: Packet) -> Option<Packet> {
        self.stats.packets = self.stats.packets.wrapping_add(1);
        Some(packet)
    }

    /// Decode every packet in `bytes`
    ///
    /// The decoder keeps its state between calls, so a packet split across
    /// two slices is still decoded.
    pub fn decode<'a>(&'a mut self, bytes: &'a [u8]) -> impl Iterator<Item = Packet> + 'a {
        bytes.iter().filter_map(move |&byte| self.feed(byte))
    }
}
