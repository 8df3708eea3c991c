//! Switch debouncing
//!
//! A transition is reported only when the hold-off timer has run out.
//! Reporting restarts the timer, so each switch reports at most one
//! transition per window. Edges that arrive while the timer runs are not
//! queued; if the level still differs from the reported one when the
//! window closes, that level is reported then.

/// Default hold-off window in sampling cycles
pub const DEFAULT_DEBOUNCE_CYCLES: u8 = 10;

/// Debounce state of one digital channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    /// Level last reported to the host
    reported: bool,
    /// Cycles left before another transition may be reported
    timer: u8,
    /// Window length restored after each report
    hold_off: u8,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_CYCLES)
    }
}

impl Debouncer {
    /// Create a debouncer with the reported level low and no hold-off running
    pub const fn new(hold_off: u8) -> Self {
        Self {
            reported: false,
            timer: 0,
            hold_off,
        }
    }

    /// Level last reported
    pub fn reported(&self) -> bool {
        self.reported
    }

    /// Cycles left in the current hold-off window
    pub fn timer(&self) -> u8 {
        self.timer
    }

    /// Feed the level read this cycle
    ///
    /// Returns the new level if a transition is reported. The timer counts
    /// down on every call, reported or not.
    pub fn update(&mut self, level: bool) -> Option<bool> {
        let mut event = None;

        if level != self.reported && self.timer == 0 {
            self.reported = level;
            self.timer = self.hold_off;
            event = Some(level);
        }

        self.timer = self.timer.saturating_sub(1);
        event
    }
}
