//! GPIO adapters for STM32F3
//!
//! Wraps an infallible `embedded-hal` output (such as
//! `embassy_stm32::gpio::Output`) as a `minicon-hal` [`OutputPin`],
//! remembering the level last driven.

use core::convert::Infallible;

use embedded_hal::digital::OutputPin as EhOutputPin;
use minicon_hal::OutputPin;

/// Control line driven through `embedded-hal`
pub struct HalOutput<P> {
    pin: P,
    high: bool,
}

impl<P: EhOutputPin<Error = Infallible>> HalOutput<P> {
    /// Wrap `pin`, whose current level is `high`
    pub fn new(pin: P, high: bool) -> Self {
        Self { pin, high }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: EhOutputPin<Error = Infallible>> OutputPin for HalOutput<P> {
    fn set_high(&mut self) {
        match self.pin.set_high() {
            Ok(()) => self.high = true,
            Err(never) => match never {},
        }
    }

    fn set_low(&mut self) {
        match self.pin.set_low() {
            Ok(()) => self.high = false,
            Err(never) => match never {},
        }
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}
