//! Frame buffer and PCD8544 driver for the Minicon console
//!
//! This crate provides:
//! - `FrameBuffer`: the packed 84x48 1-bit bitmap with rotation mapping
//! - `Pcd8544`: the command/data protocol driver that owns the buffer
//! - `PixelDisplay`: the pixel contract drawing code is written against
//! - `Canvas`: an `embedded-graphics` draw target over any `PixelDisplay`
//!
//! # Buffer layout
//!
//! The LCD addresses memory in 8-pixel vertical bands. Byte `x + (y / 8) * 84`
//! holds column `x` of band `y / 8`, with pixel row `y % 8` in bit `y % 8`.
//! A flush streams the bytes in order starting from address (0, 0).

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod canvas;
pub mod framebuffer;
pub mod pcd8544;

// Re-export key types
pub use backend::{DisplayError, PixelDisplay};
pub use canvas::Canvas;
pub use embedded_graphics::pixelcolor::BinaryColor;
pub use framebuffer::{FrameBuffer, Rotation, BUFFER_SIZE, LCD_HEIGHT, LCD_WIDTH};
pub use pcd8544::{BusMode, DisplayMode, Pcd8544};
