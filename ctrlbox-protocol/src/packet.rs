//! Channel events and their wire encoding.
//!
//! Analog packet (3 bytes):
//! - HEADER: `0x80 | channel`
//! - HIGH: `value >> 7`
//! - LOW: `value & 0x7F`
//!
//! Digital packet (2 bytes):
//! - HEADER: `0xC0 | channel`
//! - VALUE: 0 or 1

use heapless::Vec;

/// Bit 7: marks a header byte
pub const HEADER_START: u8 = 0x80;

/// Bit 6 of a header: set for digital packets, clear for analog
pub const HEADER_DIGITAL: u8 = 0x40;

/// Channel field of a header byte
pub const CHANNEL_MASK: u8 = 0x3F;

/// Payload bytes carry 7 bits
pub const PAYLOAD_MASK: u8 = 0x7F;

/// Potentiometers on the control surface
pub const ANALOG_CHANNELS: u8 = 6;

/// Switches on the control surface
pub const DIGITAL_CHANNELS: u8 = 10;

/// Largest value two 7-bit payload bytes can carry
pub const MAX_ANALOG_VALUE: u16 = 0x3FFF;

/// Full-scale reading of the firmware ADC
pub const ANALOG_FULL_SCALE: u16 = 1023;

pub const ANALOG_PACKET_SIZE: usize = 3;
pub const DIGITAL_PACKET_SIZE: usize = 2;

/// Largest encoded packet
pub const MAX_PACKET_SIZE: usize = ANALOG_PACKET_SIZE;

/// Errors that can occur when building or encoding a packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PacketError {
    /// Channel does not fit the 6-bit header field
    InvalidChannel,
    /// Analog value does not fit in 14 bits
    ValueOutOfRange,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Kind of physical input a channel belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelKind {
    /// Potentiometer
    Analog,
    /// Switch
    Digital,
}

/// A control surface input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    kind: ChannelKind,
    index: u8,
}

impl Channel {
    /// Analog channel `index` (0-based)
    pub const fn analog(index: u8) -> Self {
        Self {
            kind: ChannelKind::Analog,
            index,
        }
    }

    /// Digital channel `index` (0-based)
    pub const fn digital(index: u8) -> Self {
        Self {
            kind: ChannelKind::Digital,
            index,
        }
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    /// 0-based index as carried on the wire
    pub fn index(&self) -> u8 {
        self.index
    }

    /// 1-based number as shown to users
    pub fn number(&self) -> u16 {
        u16::from(self.index) + 1
    }

    /// Returns true if the index is wired on the control surface
    pub fn is_wired(&self) -> bool {
        match self.kind {
            ChannelKind::Analog => self.index < ANALOG_CHANNELS,
            ChannelKind::Digital => self.index < DIGITAL_CHANNELS,
        }
    }
}

/// A reportable channel event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Packet {
    /// Potentiometer reading (firmware produces 0..=1023)
    Analog { channel: u8, value: u16 },
    /// Switch level (0 or 1)
    Digital { channel: u8, value: u8 },
}

impl Packet {
    /// Build an analog packet, checking that it fits the wire format
    pub fn analog(channel: u8, value: u16) -> Result<Self, PacketError> {
        if channel > CHANNEL_MASK {
            return Err(PacketError::InvalidChannel);
        }
        if value > MAX_ANALOG_VALUE {
            return Err(PacketError::ValueOutOfRange);
        }
        Ok(Packet::Analog { channel, value })
    }

    /// Build a digital packet from a switch level
    pub fn digital(channel: u8, level: bool) -> Result<Self, PacketError> {
        if channel > CHANNEL_MASK {
            return Err(PacketError::InvalidChannel);
        }
        Ok(Packet::Digital {
            channel,
            value: u8::from(level),
        })
    }

    /// The channel this event belongs to
    pub fn channel(&self) -> Channel {
        match *self {
            Packet::Analog { channel, .. } => Channel::analog(channel),
            Packet::Digital { channel, .. } => Channel::digital(channel),
        }
    }

    /// Header byte for this packet
    pub fn header(&self) -> u8 {
        match *self {
            Packet::Analog { channel, .. } => HEADER_START | (channel & CHANNEL_MASK),
            Packet::Digital { channel, .. } => {
                HEADER_START | HEADER_DIGITAL | (channel & CHANNEL_MASK)
            }
        }
    }

    /// Encoded size in bytes
    pub fn wire_len(&self) -> usize {
        match self {
            Packet::Analog { .. } => ANALOG_PACKET_SIZE,
            Packet::Digital { .. } => DIGITAL_PACKET_SIZE,
        }
    }

    /// Analog value scaled to `0.0..=1.0` of the ADC range
    ///
    /// Returns `None` for digital packets.
    pub fn normalized(&self) -> Option<f32> {
        match *self {
            Packet::Analog { value, .. } => Some(f32::from(value) / f32::from(ANALOG_FULL_SCALE)),
            Packet::Digital { .. } => None,
        }
    }

    /// Encode this packet into a byte buffer
    ///
    /// Out-of-range fields are masked so that only the header byte ever
    /// has bit 7 set. Returns the number of bytes written.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, PacketError> {
        let len = self.wire_len();
        if buffer.len() < len {
            return Err(PacketError::BufferTooSmall);
        }

        buffer[0] = self.header();
        match *self {
            Packet::Analog { value, .. } => {
                buffer[1] = ((value >> 7) as u8) & PAYLOAD_MASK;
                buffer[2] = (value as u8) & PAYLOAD_MASK;
            }
            Packet::Digital { value, .. } => {
                buffer[1] = value & PAYLOAD_MASK;
            }
        }

        Ok(len)
    }

    /// Encode this packet into a heapless Vec
    pub fn encode_to_vec(&self) -> Vec<u8, MAX_PACKET_SIZE> {
        let mut buffer = [0u8; MAX_PACKET_SIZE];
        // MAX_PACKET_SIZE always fits
        let len = self.encode(&mut buffer).unwrap_or(0);
        buffer[..len].iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analog_encode() {
        let packet = Packet::analog(2, 512).unwrap();
        let mut buffer = [0u8; 4];
        let len = packet.encode(&mut buffer).unwrap();

        assert_eq!(len, 3);
        assert_eq!(buffer[0], 0x82);
        assert_eq!(buffer[1], 0x04); // 512 >> 7
        assert_eq!(buffer[2], 0x00); // 512 & 0x7F
    }

    #[test]
    fn test_analog_encode_full_scale() {
        let packet = Packet::analog(5, 1023).unwrap();
        assert_eq!(packet.encode_to_vec().as_slice(), &[0x85, 0x07, 0x7F]);
    }

    #[test]
    fn test_digital_encode() {
        let packet = Packet::digital(9, true).unwrap();
        assert_eq!(packet.encode_to_vec().as_slice(), &[0xC9, 0x01]);

        let packet = Packet::digital(0, false).unwrap();
        assert_eq!(packet.encode_to_vec().as_slice(), &[0xC0, 0x00]);
    }

    #[test]
    fn test_payload_never_has_start_bit() {
        let packet = Packet::Analog {
            channel: 1,
            value: 0xFFFF,
        };
        let bytes = packet.encode_to_vec();
        assert_eq!(bytes[0], 0x81);
        assert!(bytes[1..].iter().all(|b| b & HEADER_START == 0));
    }

    #[test]
    fn test_buffer_too_small() {
        let packet = Packet::analog(0, 1).unwrap();
        let mut buffer = [0u8; 2];
        assert_eq!(packet.encode(&mut buffer), Err(PacketError::BufferTooSmall));
    }

    #[test]
    fn test_constructor_validation() {
        assert_eq!(Packet::analog(0x40, 0), Err(PacketError::InvalidChannel));
        assert_eq!(Packet::analog(0, 0x4000), Err(PacketError::ValueOutOfRange));
        assert_eq!(Packet::digital(0x40, true), Err(PacketError::InvalidChannel));
        assert!(Packet::analog(0x3F, MAX_ANALOG_VALUE).is_ok());
    }

    #[test]
    fn test_channel_numbering() {
        let channel = Packet::analog(2, 0).unwrap().channel();
        assert_eq!(channel.kind(), ChannelKind::Analog);
        assert_eq!(channel.index(), 2);
        assert_eq!(channel.number(), 3);
        assert!(channel.is_wired());
        assert!(!Channel::analog(6).is_wired());
        assert!(Channel::digital(9).is_wired());
        assert!(!Channel::digital(10).is_wired());
    }

    #[test]
    fn test_normalized() {
        assert_eq!(Packet::analog(0, 1023).unwrap().normalized(), Some(1.0));
        assert_eq!(Packet::analog(0, 0).unwrap().normalized(), Some(0.0));
        assert_eq!(Packet::digital(0, true).unwrap().normalized(), None);
    }
}
