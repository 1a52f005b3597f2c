//! Pixel display contract
//!
//! Defines the interface drawing code and programs use, independent of the
//! controller chip behind it.

use embedded_graphics::pixelcolor::BinaryColor;

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// The bus rejected a transfer
    Communication,
    /// The previous transfer never completed
    BusTimeout,
}

/// Pixel-addressable display with an off-screen buffer
///
/// Coordinates are logical, i.e. after the display's rotation is applied.
/// Drawing only touches the buffer; nothing reaches the panel until
/// [`PixelDisplay::flush`].
pub trait PixelDisplay {
    /// Logical width in pixels
    fn width(&self) -> u32;

    /// Logical height in pixels
    fn height(&self) -> u32;

    /// Set one pixel; coordinates outside the display are ignored
    fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor);

    /// Read one pixel; coordinates outside the display read as `Off`
    fn get_pixel(&self, x: i32, y: i32) -> BinaryColor;

    /// Clear the buffer (but don't refresh the panel)
    fn clear(&mut self);

    /// Push the buffer to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;
}
