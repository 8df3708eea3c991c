//! Status LED activity indicator
//!
//! Any reported change lights the LED for a few cycles. Shared by all
//! channels.

/// Default length of one activity blink, in cycles
pub const DEFAULT_ACTIVITY_CYCLES: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActivityIndicator {
    countdown: u8,
    length: u8,
}

impl Default for ActivityIndicator {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_CYCLES)
    }
}

impl ActivityIndicator {
    pub const fn new(length: u8) -> Self {
        Self {
            countdown: 0,
            length,
        }
    }

    /// Restart the blink
    pub fn trigger(&mut self) {
        self.countdown = self.length;
    }

    pub fn is_active(&self) -> bool {
        self.countdown > 0
    }

    /// Advance one cycle
    ///
    /// Returns the level to drive the LED to, or `None` if the output
    /// should be left alone.
    pub fn tick(&mut self) -> Option<bool> {
        match self.countdown {
            0 => None,
            1 => {
                self.countdown = 0;
                Some(false)
            }
            _ => {
                self.countdown -= 1;
                Some(true)
            }
        }
    }
}
