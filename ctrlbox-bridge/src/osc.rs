//! OSC publishing
//!
//! Each decoded packet becomes one OSC message:
//! - analog: `/ctrlbox/analog/N` with a float in `0.0..=1.0`
//! - digital: `/ctrlbox/digital/N` with an int (0 or 1)
//!
//! `N` is the 1-based channel number.

use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};

use ctrlbox_protocol::{ChannelKind, Packet};
use rosc::{encoder, OscMessage, OscPacket, OscType};

use crate::error::BridgeError;

/// Address prefix shared by every message
pub const OSC_PREFIX: &str = "/ctrlbox";

/// Consumer of decoded events
pub trait Publisher {
    fn publish(&mut self, packet: &Packet) -> Result<(), BridgeError>;
}

/// OSC address for a packet
pub fn osc_address(packet: &Packet) -> String {
    let channel = packet.channel();
    let kind = match channel.kind() {
        ChannelKind::Analog => "analog",
        ChannelKind::Digital => "digital",
    };
    format!("{}/{}/{}", OSC_PREFIX, kind, channel.number())
}

/// Build the OSC message for a packet
pub fn to_osc_message(packet: &Packet) -> OscMessage {
    let arg = match *packet {
        Packet::Analog { .. } => OscType::Float(packet.normalized().unwrap_or_default()),
        Packet::Digital { value, .. } => OscType::Int(i32::from(value)),
    };
    OscMessage {
        addr: osc_address(packet),
        args: vec![arg],
    }
}

/// Sends OSC messages over UDP
pub struct OscPublisher {
    socket: UdpSocket,
    target: SocketAddr,
}

impl OscPublisher {
    /// Resolve `host:port` and bind an ephemeral local socket of the same
    /// address family
    pub fn new(host: &str, port: u16) -> Result<Self, BridgeError> {
        let target = (host, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| BridgeError::Osc(format!("{}:{} did not resolve", host, port)))?;

        let local: SocketAddr = match target {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };
        let socket = UdpSocket::bind(local)?;

        Ok(Self { socket, target })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }
}

impl Publisher for OscPublisher {
    fn publish(&mut self, packet: &Packet) -> Result<(), BridgeError> {
        let message = OscPacket::Message(to_osc_message(packet));
        let bytes = encoder::encode(&message).map_err(|e| BridgeError::Osc(format!("{:?}", e)))?;
        self.socket.send_to(&bytes, self.target)?;
        Ok(())
    }
}
