//! Analog input abstractions
//!
//! The potentiometers are read through a 10-bit ADC, so every reading is in
//! `0..=ADC_MAX`.

/// Largest raw ADC reading
pub const ADC_MAX: u16 = 1023;

/// A bank of analog inputs addressed by channel index
pub trait AnalogInputs {
    /// Number of channels in the bank
    fn channel_count(&self) -> u8;

    /// Take one raw reading from channel `index`
    ///
    /// Implementations return values in `0..=ADC_MAX`; callers clamp
    /// anything larger.
    fn read_raw(&mut self, index: u8) -> u16;
}
