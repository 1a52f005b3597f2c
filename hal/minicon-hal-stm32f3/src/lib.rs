//! STM32F3-specific HAL for the Minicon console
//!
//! This crate provides STM32F3 implementations of the `minicon-hal` traits.
//! Peripheral bring-up (clocks, pins, SPI) stays with `embassy-stm32`; the
//! parts the console drives by hand live here:
//!
//! - [`gpio::HalOutput`] / [`spi::BlockingSpi`] - adapters from `embedded-hal`
//! - [`rtc::RtcWakeTimer`] - RTC wakeup unit as the sleep wake timer
//! - [`power::CorePower`] - tick suspension, WFI, stop mode, clock restore
//! - [`exti`] - routing button pins and the RTC wakeup to EXTI lines
//! - [`delay::CycleDelay`] - busy-wait delay for reset timing
//!
//! # Features
//!
//! - `stm32f303k8` - Enable support for STM32F303K8 (Nucleo-32 board)
//! - `stm32f303re` - Enable support for STM32F303RE (Nucleo-64 board)
//! - `defmt` - Enable debug formatting support

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod exti;
pub mod gpio;
pub mod power;
pub mod rtc;
pub mod spi;

pub use delay::CycleDelay;
pub use gpio::HalOutput;
pub use power::{ClockSnapshot, CorePower};
pub use rtc::RtcWakeTimer;
pub use spi::BlockingSpi;
