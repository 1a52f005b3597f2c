//! Minicon Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the console core is written
//! against. Chip-specific crates (currently STM32F3) implement them, and the
//! host test suites implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  minicon-firmware (programs, ISRs)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  minicon-core / minicon-display         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  minicon-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  minicon-hal-stm32f3                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Control lines (reset, data/command, chip select)
//! - [`spi::SpiBus`] - Transmit-only display bus with completion polling
//! - [`timer::WakeTimer`] - One-shot wake-up timer
//! - [`power::PowerControl`] - Sleep primitives and clock restoration

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod power;
pub mod spi;
pub mod timer;

// Re-export key traits at crate root for convenience
pub use gpio::{OutputPin, PinId};
pub use power::{ClockError, PowerControl};
pub use spi::SpiBus;
pub use timer::{TimerError, WakeTimer};
