//! Idle sleep with logging

use defmt::*;
use minicon_core::{PowerError, SleepOutcome, Sleeper};

use crate::board::Scheduler;

/// Power scheduler that logs when sleeps start and stop being skipped
pub struct Idle {
    scheduler: Scheduler,
    /// Skipped sleeps in the current run of failures
    skipped: u32,
}

impl Idle {
    pub fn new(scheduler: Scheduler) -> Self {
        Self {
            scheduler,
            skipped: 0,
        }
    }
}

impl Sleeper for Idle {
    fn sleep(&mut self, interval_ms: u32) -> Result<SleepOutcome, PowerError> {
        let outcome = self.scheduler.sleep(interval_ms)?;
        match outcome {
            SleepOutcome::Skipped(e) => {
                if self.skipped == 0 {
                    warn!("Wake timer failed ({:?}), polling instead of sleeping", e);
                }
                self.skipped = self.skipped.saturating_add(1);
            }
            SleepOutcome::Slept => {
                if self.skipped > 0 {
                    info!("Sleeping again after {} skipped sleeps", self.skipped);
                    self.skipped = 0;
                }
            }
        }
        Ok(outcome)
    }
}
