//! ctrlbox Serial Protocol
//!
//! This crate defines the byte protocol the control surface firmware uses
//! to report potentiometer and switch changes to the host. There is no
//! length field and no checksum: every packet starts with a header byte
//! that has bit 7 set, and every payload byte has bit 7 clear, which is
//! enough for the receiver to resynchronize after a lost byte.
//!
//! # Packet Overview
//!
//! ```text
//!         Analog (3 bytes)     Digital (2 bytes)
//! header  1 0 c c c c c c      1 1 c c c c c c
//! byte 1  0 h h h h h h h      0 0 0 0 0 0 0 v
//! byte 2  0 l l l l l l l
//! ```
//!
//! Bit 6 of the header distinguishes digital from analog, so both kinds
//! share a 6-bit channel field.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod decoder;
pub mod packet;

pub use decoder::{Decoder, DecoderState, DecoderStats};
pub use packet::{
    Channel, ChannelKind, Packet, PacketError, ANALOG_CHANNELS, DIGITAL_CHANNELS, HEADER_DIGITAL,
    HEADER_START, MAX_PACKET_SIZE,
};
