//! GPIO pin abstractions
//!
//! The display only needs push-pull outputs: reset, data/command select and
//! chip select. Buttons are delivered as interrupts and never polled.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
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

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Port/pin pair identifying a GPIO line, as wired on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId {
    /// Port letter ('A'..='F')
    pub port: char,
    /// Pin number within the port (0..=15)
    pub pin: u8,
}

impl PinId {
    /// Create a new pin identifier
    pub const fn new(port: char, pin: u8) -> Self {
        Self { port, pin }
    }

    /// Zero-based port index (A = 0), as used by EXTI port selection
    pub fn port_index(&self) -> u8 {
        (self.port as u8).wrapping_sub(b'A')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_index() {
        assert_eq!(PinId::new('A', 0).port_index(), 0);
        assert_eq!(PinId::new('C', 3).port_index(), 2);
    }
}
