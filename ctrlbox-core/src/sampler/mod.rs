//! Per-channel sampling policy
//!
//! Decides, cycle by cycle, which raw readings are worth reporting:
//! - potentiometers go through an [`AnalogFilter`] and report whenever the
//!   smoothed value changes
//! - switches go through a [`Debouncer`] and report at most one transition
//!   per hold-off window
//!
//! Every report also restarts the shared [`ActivityIndicator`].

mod activity;
mod debounce;
mod smoothing;

pub use activity::{ActivityIndicator, DEFAULT_ACTIVITY_CYCLES};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_CYCLES};
pub use smoothing::{AnalogFilter, DEFAULT_SMOOTHING_GAIN};

use ctrlbox_hal::{AnalogInputs, DigitalInputs};
use ctrlbox_protocol::{Packet, ANALOG_CHANNELS, DIGITAL_CHANNELS};
use heapless::Vec;

const ANALOG_COUNT: usize = ANALOG_CHANNELS as usize;
const DIGITAL_COUNT: usize = DIGITAL_CHANNELS as usize;

/// Most packets one cycle can produce
pub const MAX_EVENTS_PER_CYCLE: usize = ANALOG_COUNT + DIGITAL_COUNT;

/// Sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplerConfig {
    /// Weight of a new analog reading, per-mille
    pub smoothing_gain: u16,
    /// Switch hold-off window, in cycles
    pub debounce_cycles: u8,
    /// Status LED blink length, in cycles
    pub activity_cycles: u8,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            smoothing_gain: DEFAULT_SMOOTHING_GAIN,
            debounce_cycles: DEFAULT_DEBOUNCE_CYCLES,
            activity_cycles: DEFAULT_ACTIVITY_CYCLES,
        }
    }
}

/// Sampling state for every channel on the surface
#[derive(Debug, Clone)]
pub struct Sampler {
    analog: [AnalogFilter; ANALOG_COUNT],
    digital: [Debouncer; DIGITAL_COUNT],
    activity: ActivityIndicator,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}

impl Sampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            analog: [AnalogFilter::new(config.smoothing_gain); ANALOG_COUNT],
            digital: [Debouncer::new(config.debounce_cycles); DIGITAL_COUNT],
            activity: ActivityIndicator::new(config.activity_cycles),
        }
    }

    /// Smoothed value of an analog channel
    pub fn analog_value(&self, channel: u8) -> Option<u16> {
        self.analog.get(channel as usize).map(AnalogFilter::value)
    }

    /// Last reported level of a digital channel
    pub fn digital_level(&self, channel: u8) -> Option<bool> {
        self.digital.get(channel as usize).map(Debouncer::reported)
    }

    pub fn activity(&self) -> &ActivityIndicator {
        &self.activity
    }

    /// Feed one raw analog reading
    ///
    /// Returns a packet if the smoothed value changed. Unknown channels
    /// never report.
    pub fn update_analog(&mut self, channel: u8, raw: u16) -> Option<Packet> {
        let value = self.analog.get_mut(channel as usize)?.update(raw)?;
        self.activity.trigger();
        Some(Packet::Analog { channel, value })
    }

    /// Feed one switch level
    ///
    /// Returns a packet if a transition is reported. Unknown channels
    /// never report.
    pub fn update_digital(&mut self, channel: u8, level: bool) -> Option<Packet> {
        let level = self.digital.get_mut(channel as usize)?.update(level)?;
        self.activity.trigger();
        Some(Packet::Digital {
            channel,
            value: u8::from(level),
        })
    }

    /// Run one sampling cycle, handing each packet to `emit` as it is made
    ///
    /// Analog channels are scanned first, then digital, each in ascending
    /// order. Returns the number of packets emitted.
    pub fn sample_with<A, D, F>(&mut self, analog: &mut A, digital: &mut D, mut emit: F) -> usize
    where
        A: AnalogInputs,
        D: DigitalInputs,
        F: FnMut(Packet),
    {
        let mut emitted = 0;

        for channel in 0..analog.channel_count().min(ANALOG_CHANNELS) {
            if let Some(packet) = self.update_analog(channel, analog.read_raw(channel)) {
                emit(packet);
                emitted += 1;
            }
        }

        for channel in 0..digital.channel_count().min(DIGITAL_CHANNELS) {
            if let Some(packet) = self.update_digital(channel, digital.read_level(channel)) {
                emit(packet);
                emitted += 1;
            }
        }

        emitted
    }

    /// Run one sampling cycle and collect its packets
    pub fn sample<A, D>(&mut self, analog: &mut A, digital: &mut D) -> Vec<Packet, MAX_EVENTS_PER_CYCLE>
    where
        A: AnalogInputs,
        D: DigitalInputs,
    {
        let mut packets = Vec::new();
        self.sample_with(analog, digital, |packet| {
            // At most one packet per channel per cycle
            let _ = packets.push(packet);
        });
        packets
    }

    /// Advance the activity indicator one cycle
    ///
    /// Returns the level to drive the status LED to, if any.
    pub fn tick_activity(&mut self) -> Option<bool> {
        self.activity.tick()
    }
}
