//! CPU power state primitives
//!
//! These are the raw steps the power scheduler sequences; none of them
//! make policy decisions.

/// Clock tree could not be brought back after a stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// External oscillator did not become ready
    HseNotReady,
    /// PLL did not lock
    PllNotLocked,
    /// SYSCLK did not switch back to its source
    SwitchFailed,
}

/// Low-level sleep and clock control
pub trait PowerControl {
    /// Stop the periodic system tick interrupt
    ///
    /// Without this the tick would end every sleep within a millisecond.
    fn suspend_tick(&mut self);

    /// Restart the periodic system tick interrupt if it was running
    fn resume_tick(&mut self);

    /// Light sleep: halt the core until the next interrupt
    fn wait_for_interrupt(&mut self);

    /// Deep sleep: stop the main clocks and halt until the next interrupt
    ///
    /// On return the core runs from the reset clock source.
    fn enter_stop(&mut self);

    /// Re-establish the main clock tree after a stop
    ///
    /// On error the core is left on the reset clock source.
    fn restore_clocks(&mut self) -> Result<(), ClockError>;
}
