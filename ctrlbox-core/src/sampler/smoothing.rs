//! Exponential smoothing for potentiometer readings
//!
//! Each cycle the accumulator moves a fixed fraction (the gain, in
//! per-mille) toward the raw reading:
//!
//! ```text
//! smoothed = raw * gain / 1000 + previous * (1000 - gain) / 1000
//! ```
//!
//! Both terms are truncated separately. The truncation also gives a small
//! dead band: a reading within a few counts of the accumulator does not
//! move it, so a noisy pot sitting still stops reporting.

use ctrlbox_hal::ADC_MAX;

/// Default gain: 10% of each new reading
pub const DEFAULT_SMOOTHING_GAIN: u16 = 100;

/// Gain denominator
pub const GAIN_SCALE: u32 = 1000;

/// Smoothed state of one analog channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnalogFilter {
    /// Most recent raw reading (clamped to the ADC range)
    raw: u16,
    /// Smoothed value, always within `0..=ADC_MAX`
    accumulator: u16,
    /// Weight of a new reading, per-mille
    gain: u16,
}

impl Default for AnalogFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SMOOTHING_GAIN)
    }
}

impl AnalogFilter {
    /// Create a filter with its accumulator at zero
    ///
    /// Gains above 1000 are clamped to 1000 (no smoothing).
    pub const fn new(gain: u16) -> Self {
        let gain = if gain as u32 > GAIN_SCALE {
            GAIN_SCALE as u16
        } else {
            gain
        };
        Self {
            raw: 0,
            accumulator: 0,
            gain,
        }
    }

    /// Current smoothed value
    pub fn value(&self) -> u16 {
        self.accumulator
    }

    /// Last raw reading fed to the filter
    pub fn raw(&self) -> u16 {
        self.raw
    }

    pub fn gain(&self) -> u16 {
        self.gain
    }

    /// Feed one raw reading
    ///
    /// Returns the new smoothed value if it differs from the previous one.
    pub fn update(&mut self, raw: u16) -> Option<u16> {
        let raw = raw.min(ADC_MAX);
        let previous = self.accumulator;
        let gain = u32::from(self.gain);

        let smoothed = u32::from(raw) * gain / GAIN_SCALE
            + u32::from(previous) * (GAIN_SCALE - gain) / GAIN_SCALE;

        self.raw = raw;
        // Both terms are bounded by their weights, so the sum stays in range
        self.accumulator = smoothed.min(u32::from(ADC_MAX)) as u16;

        (self.accumulator != previous).then_some(self.accumulator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_steps_toward_half_scale() {
        let mut filter = AnalogFilter::default();
        assert_eq!(filter.update(512), Some(51));
        assert_eq!(filter.update(512), Some(96));
        assert_eq!(filter.update(512), Some(137));
        assert_eq!(filter.raw(), 512);
    }

    #[test]
    fn test_settles_and_stops_reporting() {
        let mut filter = AnalogFilter::default();
        let mut last_change = 0;
        let mut previous = 0;

        for cycle in 0..200 {
            if let Some(value) = filter.update(512) {
                // Monotonic approach from below
                assert!(value > previous);
                previous = value;
                last_change = cycle;
            }
        }

        assert!(last_change < 100);
        // Truncation leaves the accumulator a little below the reading
        assert_eq!(filter.value(), 501);
        assert_eq!(filter.update(512), None);
    }

    #[test]
    fn test_full_scale_stays_in_range() {
        let mut filter = AnalogFilter::default();
        for _ in 0..500 {
            filter.update(ADC_MAX);
            assert!(filter.value() <= ADC_MAX);
        }
        assert!(filter.value() > 1000);
    }

    #[test]
    fn test_raw_above_range_is_clamped() {
        let mut filter = AnalogFilter::new(1000);
        assert_eq!(filter.update(4000), Some(ADC_MAX));
        assert_eq!(filter.raw(), ADC_MAX);
    }

    #[test]
    fn test_decays_toward_zero() {
        let mut filter = AnalogFilter::new(1000);
        filter.update(800);

        let mut filter = AnalogFilter { gain: 100, ..filter };
        assert_eq!(filter.update(0), Some(720));
        assert_eq!(filter.update(0), Some(648));
    }

    #[test]
    fn test_small_jitter_is_absorbed() {
        let mut filter = AnalogFilter::default();
        for _ in 0..200 {
            filter.update(600);
        }
        let settled = filter.value();

        // Readings bouncing by a count or two do not move the accumulator
        for raw in [601, 600, 602, 600, 601] {
            assert_eq!(filter.update(raw), None);
        }
        assert_eq!(filter.value(), settled);
    }

    #[test]
    fn test_gain_clamped() {
        assert_eq!(AnalogFilter::new(5000).gain(), 1000);
    }
}
