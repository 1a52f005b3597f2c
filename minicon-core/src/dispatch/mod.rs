//! Program and window dispatch
//!
//! Exactly one [`Program`] is active at a time. The [`Dispatcher`] runs its
//! event loop, sleeping whenever the queue is empty, and hands control to
//! another program when asked to. A [`WindowedProgram`] further forwards
//! events to whichever of its [`Window`]s has focus.
//!
//! Handlers never hold references back to the dispatcher. Everything they
//! may touch or request is passed in through a [`Context`].

pub mod context;
pub mod dispatcher;
pub mod program;
pub mod window;

pub use context::Context;
pub use dispatcher::{Dispatcher, MAX_PROGRAMS};
pub use program::Program;
pub use window::{Window, WindowedProgram};

use crate::power::PowerError;

/// Handle to a registered program
///
/// Programs are numbered in registration order starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProgramId(u8);

impl ProgramId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a window within its program
///
/// Windows are numbered in the order they were added starting at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowId(u8);

impl WindowId {
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dispatch errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// `execute` was called before any program was made active
    NoActiveProgram,
    /// Program table is full
    TooManyPrograms,
    /// Window table is full
    TooManyWindows,
    /// Sleeping between events failed
    Power(PowerError),
}

impl From<PowerError> for DispatchError {
    fn from(e: PowerError) -> Self {
        DispatchError::Power(e)
    }
}
