//! The control surface sampling loop body
//!
//! One [`Surface::poll`] is one pass of the firmware main loop: sample
//! every channel, queue each resulting packet on the serial link, then
//! update the status LED.

use ctrlbox_hal::{AnalogInputs, DigitalInputs, OutputPin};

use crate::link::SerialLink;
use crate::sampler::{Sampler, SamplerConfig};

/// Physical inputs plus the sampling state that watches them
pub struct Surface<A, D, L> {
    analog: A,
    digital: D,
    status_led: L,
    sampler: Sampler,
}

impl<A, D, L> Surface<A, D, L>
where
    A: AnalogInputs,
    D: DigitalInputs,
    L: OutputPin,
{
    pub fn new(analog: A, digital: D, status_led: L, config: SamplerConfig) -> Self {
        Self {
            analog,
            digital,
            status_led,
            sampler: Sampler::new(config),
        }
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Run one sampling cycle
    ///
    /// Blocks while the link's outbound ring is full, which stalls
    /// sampling until the transmitter catches up. Returns the number of
    /// packets sent.
    pub fn poll<const RX: usize, const TX: usize>(&mut self, link: &SerialLink<RX, TX>) -> usize {
        let sent = self
            .sampler
            .sample_with(&mut self.analog, &mut self.digital, |packet| {
                link.send(&packet)
            });

        if let Some(level) = self.sampler.tick_activity() {
            self.status_led.set_state(level);
        }

        sent
    }

    /// Give back the hardware
    pub fn release(self) -> (A, D, L) {
        (self.analog, self.digital, self.status_led)
    }
}
