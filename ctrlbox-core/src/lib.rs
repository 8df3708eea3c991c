//! Board-agnostic firmware logic for the ctrlbox control surface
//!
//! This crate contains everything between the pins and the UART that does
//! not depend on a specific microcontroller:
//!
//! - Lock-free byte rings for the interrupt-driven serial link
//! - The buffered link itself (lossy receive, blocking transmit)
//! - Analog smoothing, switch debouncing and the activity LED
//! - One pass of the sampling loop over the HAL traits

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod link;
pub mod ring;
pub mod sampler;
pub mod surface;

pub use link::{SerialLink, UartLink};
pub use ring::{RingBuffer, RX_BUFFER_SIZE, TX_BUFFER_SIZE};
pub use sampler::{Sampler, SamplerConfig};
pub use surface::Surface;
