//! Wake-up timer abstraction
//!
//! A one-shot hardware timer that keeps running while the core sleeps
//! (the RTC wakeup unit on STM32). Its expiry interrupt is what ends a
//! sleep when no button is pressed.

/// Errors from wake timer operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    /// The peripheral did not acknowledge the request in time
    Timeout,
    /// Requested interval cannot be represented by the hardware
    OutOfRange,
}

/// One-shot wake-up timer
pub trait WakeTimer {
    /// Arm the timer to fire once after `interval_ms` milliseconds
    ///
    /// The expiry interrupt is delivered to the firmware, which turns it
    /// into a timer event.
    fn arm(&mut self, interval_ms: u32) -> Result<(), TimerError>;

    /// Disarm the timer
    ///
    /// Disarming an already disarmed timer succeeds.
    fn disarm(&mut self) -> Result<(), TimerError>;
}
