//! GPIO pin abstractions
//!
//! Switch inputs and the status LED output.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// A bank of switch inputs addressed by channel index
///
/// The control surface wires its switches to consecutive pins; the bank
/// hides that mapping from the sampler.
pub trait DigitalInputs {
    /// Number of channels in the bank
    fn channel_count(&self) -> u8;

    /// Read the current level of channel `index`
    ///
    /// Indices outside the bank read as low.
    fn read_level(&mut self, index: u8) -> bool;
}

// Blanket implementation: an array of pins is a bank
impl<P: InputPin, const N: usize> DigitalInputs for [P; N] {
    fn channel_count(&self) -> u8 {
        N as u8
    }

    fn read_level(&mut self, index: u8) -> bool {
        self.get(index as usize).is_some_and(|pin| pin.is_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPin(bool);

    impl InputPin for FixedPin {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_pin_array_is_bank() {
        let mut bank = [FixedPin(false), FixedPin(true), FixedPin(false)];
        assert_eq!(bank.channel_count(), 3);
        assert!(!bank.read_level(0));
        assert!(bank.read_level(1));
    }

    #[test]
    fn test_out_of_range_reads_low() {
        let mut bank = [FixedPin(true)];
        assert!(bank.read_level(0));
        assert!(!bank.read_level(4));
    }
}
