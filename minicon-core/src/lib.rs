//! Board-agnostic core logic for the Minicon console
//!
//! This crate contains everything between the interrupt handlers and the
//! applications that does not depend on a specific chip:
//!
//! - Events and the interrupt-safe event queue
//! - Button line to event mapping
//! - Power scheduler (light sleep and stop mode with a wake timer)
//! - Program/Window dispatch with focus transfer and program handoff
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod dispatch;
pub mod events;
pub mod input;
pub mod power;

pub use dispatch::{
    Context, DispatchError, Dispatcher, Program, ProgramId, Window, WindowId, WindowedProgram,
};
pub use events::{Event, EventQueue};
pub use power::{PowerError, PowerScheduler, SleepDepth, SleepOutcome, Sleeper};
