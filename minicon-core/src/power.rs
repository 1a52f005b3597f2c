//! Power scheduler
//!
//! Puts the core to sleep while the event queue is empty. Two wake sources
//! must always be live during a sleep: any enabled interrupt (buttons) and
//! a one-shot wake timer so periodic work still happens with no input.
//!
//! Sequence for one sleep:
//!
//! 1. Disarm the wake timer (a leftover arm is harmless, failure ignored)
//! 2. Arm it for the requested interval
//! 3. Suspend the system tick and enter the sleep primitive
//! 4. Resume the tick
//! 5. Disarm the timer again; failure here is fatal
//! 6. After stop mode, restore the clock tree; failure here is fatal too

use minicon_hal::{ClockError, PowerControl, TimerError, WakeTimer};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How deeply to sleep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SleepDepth {
    /// Core halted, clocks running. Fast wake.
    #[default]
    Light,
    /// Main clocks stopped, regulator in low-power mode. Clocks must be
    /// restored on wake.
    Stop,
}

/// Result of a sleep request that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepOutcome {
    /// Slept until an interrupt or the wake timer
    Slept,
    /// The wake timer could not be armed, so the core stayed awake
    Skipped(TimerError),
}

/// Power errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerError {
    /// The wake timer could not be stopped after waking
    DisarmFailed(TimerError),
    /// Stop mode was left on the reset clock source
    ClockRestoreFailed(ClockError),
}

/// Anything that can idle the core between events
pub trait Sleeper {
    /// Sleep for at most `interval_ms`, or until an interrupt
    fn sleep(&mut self, interval_ms: u32) -> Result<SleepOutcome, PowerError>;
}

impl<S: Sleeper + ?Sized> Sleeper for &mut S {
    fn sleep(&mut self, interval_ms: u32) -> Result<SleepOutcome, PowerError> {
        (**self).sleep(interval_ms)
    }
}

/// Sequences the wake timer and power primitives
pub struct PowerScheduler<T, P> {
    timer: T,
    power: P,
    depth: SleepDepth,
}

impl<T: WakeTimer, P: PowerControl> PowerScheduler<T, P> {
    pub fn new(timer: T, power: P, depth: SleepDepth) -> Self {
        Self { timer, power, depth }
    }

    /// Current sleep depth
    pub fn depth(&self) -> SleepDepth {
        self.depth
    }

    /// Change the depth used by subsequent sleeps
    pub fn set_depth(&mut self, depth: SleepDepth) {
        self.depth = depth;
    }

    /// Sleep once at the configured depth
    ///
    /// Returns after the wake timer expires or any other enabled interrupt
    /// fires, whichever is first. Exactly one arm is matched by exactly one
    /// disarm on the way out.
    pub fn sleep(&mut self, interval_ms: u32) -> Result<SleepOutcome, PowerError> {
        let _ = self.timer.disarm();

        if let Err(e) = self.timer.arm(interval_ms) {
            // Without the timer only a button could end the sleep
            return Ok(SleepOutcome::Skipped(e));
        }

        self.power.suspend_tick();
        match self.depth {
            SleepDepth::Light => self.power.wait_for_interrupt(),
            SleepDepth::Stop => self.power.enter_stop(),
        }
        self.power.resume_tick();

        self.timer.disarm().map_err(PowerError::DisarmFailed)?;

        if self.depth == SleepDepth::Stop {
            self.power
                .restore_clocks()
                .map_err(PowerError::ClockRestoreFailed)?;
        }

        Ok(SleepOutcome::Slept)
    }

    /// Give back the timer and power control
    pub fn release(self) -> (T, P) {
        (self.timer, self.power)
    }
}

impl<T: WakeTimer, P: PowerControl> Sleeper for PowerScheduler<T, P> {
    fn sleep(&mut self, interval_ms: u32) -> Result<SleepOutcome, PowerError> {
        PowerScheduler::sleep(self, interval_ms)
    }
}
