//! Terminal error handler
//!
//! The dispatcher only gives up on power errors: a wake timer that cannot
//! be stopped, or a clock tree that did not come back after stop mode.

use defmt::*;
use minicon_core::config::FatalAction;
use minicon_core::DispatchError;

use crate::config::CONSOLE_CONFIG;

/// Log `error` and halt or reset, as configured
pub fn fatal(error: DispatchError) -> ! {
    error!("Fatal error: {:?}", error);

    match CONSOLE_CONFIG.on_fatal {
        FatalAction::Reset => {
            warn!("Resetting");
            cortex_m::peripheral::SCB::sys_reset()
        }
        FatalAction::Halt => {
            cortex_m::interrupt::disable();
            loop {
                core::hint::spin_loop();
            }
        }
    }
}
