//! PCD8544 LCD Driver
//!
//! Driver for the 84x48 PCD8544 controller (Nokia 5110 panels) on a
//! transmit-only SPI bus with separate data/command, chip-select and reset
//! lines.
//!
//! The D/C line selects whether the bytes on the bus are commands or pixel
//! data. It is sampled by the controller on the last bit of every byte, so
//! it must never move while a transfer is still shifting out. The driver
//! tracks which phase the line is in and only waits for the bus and toggles
//! the line when the phase actually changes.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_hal::delay::DelayNs;
use minicon_hal::{OutputPin, SpiBus};

use crate::backend::{DisplayError, PixelDisplay};
use crate::canvas::Canvas;
use crate::framebuffer::{FrameBuffer, Rotation};

/// PCD8544 commands
#[allow(dead_code)]
pub mod cmd {
    // Function set (valid in both instruction sets)
    pub const FUNCTION_SET: u8 = 0x20;
    pub const POWER_DOWN: u8 = 0x04;
    pub const ENTRY_MODE: u8 = 0x02;
    pub const EXTENDED_INSTRUCTION: u8 = 0x01;

    // Normal instruction set (H = 0)
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const SET_Y_ADDR: u8 = 0x40;
    pub const SET_X_ADDR: u8 = 0x80;

    // Display control modes
    pub const DISPLAY_BLANK: u8 = 0x00;
    pub const DISPLAY_ALL_ON: u8 = 0x01;
    pub const DISPLAY_NORMAL: u8 = 0x04;
    pub const DISPLAY_INVERTED: u8 = 0x05;

    // Extended instruction set (H = 1)
    pub const SET_TEMP: u8 = 0x04;
    pub const SET_BIAS: u8 = 0x10;
    pub const SET_VOP: u8 = 0x80;
}

/// Highest operating voltage (contrast) value
pub const MAX_CONTRAST: u8 = 0x7F;

/// Highest bias system value
pub const MAX_BIAS: u8 = 0x07;

/// Highest temperature coefficient value
pub const MAX_TEMP_COEFFICIENT: u8 = 0x03;

/// Default contrast used by most 5110 modules
pub const DEFAULT_CONTRAST: u8 = 60;

/// Default bias (1:48 multiplex)
pub const DEFAULT_BIAS: u8 = 0x04;

/// Reset line hold and recovery time
const RESET_DELAY_MS: u32 = 250;

/// Polls of the bus busy flag before a transfer is declared stuck
const BUS_IDLE_SPIN_LIMIT: u32 = 1_000_000;

/// Which phase the data/command line is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusMode {
    /// Nothing sent yet; the line level is unknown
    Uninitialized,
    /// D/C low, bytes are commands
    Command,
    /// D/C high, bytes are pixel data
    Data,
}

/// Display control modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// All pixels off, RAM preserved
    Blank,
    /// RAM shown as-is
    Normal,
    /// All pixels on, RAM preserved
    AllOn,
    /// RAM shown inverted
    Inverted,
}

impl DisplayMode {
    fn bits(self) -> u8 {
        match self {
            DisplayMode::Blank => cmd::DISPLAY_BLANK,
            DisplayMode::Normal => cmd::DISPLAY_NORMAL,
            DisplayMode::AllOn => cmd::DISPLAY_ALL_ON,
            DisplayMode::Inverted => cmd::DISPLAY_INVERTED,
        }
    }
}

/// PCD8544 LCD driver
pub struct Pcd8544<SPI, DC, CS, RST> {
    spi: SPI,
    /// Data/command select
    dc: DC,
    /// Chip select (active low)
    cs: CS,
    /// Reset (active low)
    rst: RST,
    framebuffer: FrameBuffer,
    /// Phase of the last transfer
    mode: BusMode,
    /// Top-left corner of the next printed text
    cursor: Point,
}

impl<SPI, DC, CS, RST> Pcd8544<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Create the driver but don't send any commands yet
    ///
    /// The bus and pins must already be configured by board bring-up.
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            framebuffer: FrameBuffer::new(),
            mode: BusMode::Uninitialized,
            cursor: Point::zero(),
        }
    }

    /// Reset the panel and send the power-up sequence
    ///
    /// Contrast and bias outside their valid ranges are clamped.
    pub fn initialize<D: DelayNs>(
        &mut self,
        delay: &mut D,
        contrast: u8,
        bias: u8,
    ) -> Result<(), DisplayError> {
        self.rst.set_low();
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high();
        delay.delay_ms(RESET_DELAY_MS);

        let contrast = contrast.min(MAX_CONTRAST);
        let bias = bias.min(MAX_BIAS);

        self.with_selected(|lcd| {
            lcd.command(cmd::FUNCTION_SET | cmd::EXTENDED_INSTRUCTION)?;
            lcd.command(cmd::SET_BIAS | bias)?;
            lcd.command(cmd::SET_VOP | contrast)?;
            lcd.command(cmd::FUNCTION_SET)?;
            lcd.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_NORMAL)
        })
    }

    /// Reprogram the operating voltage without a reset
    ///
    /// Values above [`MAX_CONTRAST`] are clamped.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        let contrast = contrast.min(MAX_CONTRAST);
        self.with_selected(|lcd| {
            lcd.command(cmd::FUNCTION_SET | cmd::EXTENDED_INSTRUCTION)?;
            lcd.command(cmd::SET_VOP | contrast)?;
            lcd.command(cmd::FUNCTION_SET)
        })
    }

    /// Set the temperature coefficient (0-3, clamped)
    pub fn set_temperature_coefficient(&mut self, coefficient: u8) -> Result<(), DisplayError> {
        let coefficient = coefficient.min(MAX_TEMP_COEFFICIENT);
        self.with_selected(|lcd| {
            lcd.command(cmd::FUNCTION_SET | cmd::EXTENDED_INSTRUCTION)?;
            lcd.command(cmd::SET_TEMP | coefficient)?;
            lcd.command(cmd::FUNCTION_SET)
        })
    }

    /// Blank, invert or restore the panel
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), DisplayError> {
        self.with_selected(|lcd| lcd.command(cmd::DISPLAY_CONTROL | mode.bits()))
    }

    /// Push the whole frame buffer to the panel
    pub fn flush(&mut self) -> Result<(), DisplayError> {
        self.with_selected(|lcd| {
            // Address (0, 0)
            lcd.command(cmd::SET_Y_ADDR)?;
            lcd.command(cmd::SET_X_ADDR)?;
            lcd.data()
        })
    }

    /// Clear the frame buffer and home the text cursor
    pub fn clear(&mut self) {
        self.framebuffer.clear();
        self.cursor = Point::zero();
    }

    /// Set one pixel at a logical coordinate
    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        self.framebuffer.set_pixel(x, y, color);
    }

    /// Read one pixel at a logical coordinate
    pub fn get_pixel(&self, x: i32, y: i32) -> BinaryColor {
        self.framebuffer.get_pixel(x, y)
    }

    /// Current orientation
    pub fn rotation(&self) -> Rotation {
        self.framebuffer.rotation()
    }

    /// Change orientation for subsequent drawing
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.framebuffer.set_rotation(rotation);
    }

    /// Move the text cursor
    pub fn set_cursor(&mut self, position: Point) {
        self.cursor = position;
    }

    /// Current text cursor
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Draw text at the cursor and advance it
    pub fn print(&mut self, text: &str) {
        let style = MonoTextStyleBuilder::new()
            .font(&FONT_5X8)
            .text_color(BinaryColor::On)
            .background_color(BinaryColor::Off)
            .build();

        let origin = self.cursor;
        let next = Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut Canvas::new(self));
        self.cursor = match next {
            Ok(position) => position,
            Err(never) => match never {},
        };
    }

    /// Drawing surface for `embedded-graphics` primitives
    pub fn canvas(&mut self) -> Canvas<'_, Self> {
        Canvas::new(self)
    }

    /// Phase of the last transfer
    pub fn bus_mode(&self) -> BusMode {
        self.mode
    }

    /// The frame buffer as it will be sent on the next flush
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, DC, CS, RST) {
        (self.spi, self.dc, self.cs, self.rst)
    }

    /// Run `f` with chip select asserted
    ///
    /// Chip select is only released after the last transfer has left the
    /// bus, and is released even if `f` fails.
    fn with_selected<F>(&mut self, f: F) -> Result<(), DisplayError>
    where
        F: FnOnce(&mut Self) -> Result<(), DisplayError>,
    {
        self.cs.set_low();
        let result = f(self).and_then(|()| self.wait_idle());
        self.cs.set_high();
        result
    }

    /// Spin until the previous transfer has completed
    fn wait_idle(&mut self) -> Result<(), DisplayError> {
        for _ in 0..BUS_IDLE_SPIN_LIMIT {
            if !self.spi.is_busy() {
                return Ok(());
            }
            core::hint::spin_loop();
        }
        Err(DisplayError::BusTimeout)
    }

    /// Switch the D/C line to `mode` if it isn't there already
    fn enter(&mut self, mode: BusMode) -> Result<(), DisplayError> {
        if self.mode == mode {
            return Ok(());
        }
        self.wait_idle()?;
        self.dc.set_state(mode == BusMode::Data);
        self.mode = mode;
        Ok(())
    }

    /// Send one command byte
    fn command(&mut self, c: u8) -> Result<(), DisplayError> {
        self.enter(BusMode::Command)?;
        self.wait_idle()?;
        self.spi
            .write(&[c])
            .map_err(|_| DisplayError::Communication)
    }

    /// Stream the frame buffer as one data transfer
    fn data(&mut self) -> Result<(), DisplayError> {
        self.enter(BusMode::Data)?;
        self.wait_idle()?;
        self.spi
            .write(self.framebuffer.as_bytes())
            .map_err(|_| DisplayError::Communication)
    }
}

impl<SPI, DC, CS, RST> PixelDisplay for Pcd8544<SPI, DC, CS, RST>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        Pcd8544::set_pixel(self, x, y, color);
    }

    fn get_pixel(&self, x: i32, y: i32) -> BinaryColor {
        Pcd8544::get_pixel(self, x, y)
    }

    fn clear(&mut self) {
        Pcd8544::clear(self);
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        Pcd8544::flush(self)
    }
}
