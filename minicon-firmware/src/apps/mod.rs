//! Built-in programs
//!
//! Programs are registered in the order of their ids below.

pub mod keys;
pub mod launcher;

use defmt::*;
use minicon_core::ProgramId;

use crate::board::Lcd;

/// Menu program, started first
pub const LAUNCHER: ProgramId = ProgramId::new(0);

/// Button test program
pub const KEY_ECHO: ProgramId = ProgramId::new(1);

/// Push the frame buffer to the panel, logging failures
pub fn present(lcd: &mut Lcd) {
    if let Err(e) = lcd.flush() {
        warn!("Display flush failed: {:?}", e);
    }
}
