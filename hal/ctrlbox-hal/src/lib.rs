//! ctrlbox Hardware Abstraction Layer
//!
//! This crate defines the hardware seams of the control surface so that the
//! sampling and link logic in `ctrlbox-core` can run against real pins on
//! the microcontroller or against in-memory fakes on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  ctrlbox-core (Sampler, Surface, Link)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ctrlbox-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  MCU pins /   │       │  host serial  │
//! │  ADC / USART  │       │  (bridge)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::DigitalInputs`] - Digital I/O
//! - [`adc::AnalogInputs`] - Potentiometer readings
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::{AnalogInputs, ADC_MAX};
pub use gpio::{DigitalInputs, InputPin, OutputPin};
pub use uart::{UartConfig, UartRx, UartTx};
