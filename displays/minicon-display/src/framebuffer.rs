//! Packed 1-bit frame buffer
//!
//! Holds every pixel of the 84x48 panel in the controller's native band
//! layout, so a flush is a single straight copy.

use embedded_graphics::pixelcolor::BinaryColor;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Panel width in pixels
pub const LCD_WIDTH: usize = 84;

/// Panel height in pixels
pub const LCD_HEIGHT: usize = 48;

/// Bytes needed for the whole panel (one bit per pixel)
pub const BUFFER_SIZE: usize = LCD_WIDTH * LCD_HEIGHT / 8;

/// Panel orientation
///
/// Each rotation is a fixed permutation of the physical 84x48 grid. For
/// 90 and 270 degrees the logical width and height swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// All rotations, in quarter-turn order
    pub const ALL: [Rotation; 4] = [
        Rotation::Deg0,
        Rotation::Deg90,
        Rotation::Deg180,
        Rotation::Deg270,
    ];

    /// Rotation from a quarter-turn count (taken modulo 4)
    pub const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    /// Whether logical width and height are swapped
    pub const fn is_transposed(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Logical (width, height) under this rotation
    pub const fn logical_size(self) -> (usize, usize) {
        if self.is_transposed() {
            (LCD_HEIGHT, LCD_WIDTH)
        } else {
            (LCD_WIDTH, LCD_HEIGHT)
        }
    }

    /// Map a logical coordinate to the physical panel coordinate
    ///
    /// Returns `None` if the coordinate lies outside the logical area.
    pub fn to_physical(self, x: i32, y: i32) -> Option<(usize, usize)> {
        let (w, h) = self.logical_size();
        if x < 0 || y < 0 || x as usize >= w || y as usize >= h {
            return None;
        }

        let (x, y) = (x as usize, y as usize);
        let physical = match self {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (y, LCD_HEIGHT - 1 - x),
            Rotation::Deg180 => (LCD_WIDTH - 1 - x, LCD_HEIGHT - 1 - y),
            Rotation::Deg270 => (LCD_WIDTH - 1 - y, x),
        };
        Some(physical)
    }
}

/// Frame buffer for the PCD8544 panel
#[derive(Clone)]
pub struct FrameBuffer {
    /// Pixel bands, see the crate docs for the layout
    buffer: [u8; BUFFER_SIZE],
    /// Active orientation
    rotation: Rotation,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Create a cleared buffer in the default orientation
    pub const fn new() -> Self {
        Self {
            buffer: [0; BUFFER_SIZE],
            rotation: Rotation::Deg0,
        }
    }

    /// Current orientation
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Change orientation; existing buffer content is left as is
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    /// Logical width
    pub fn width(&self) -> u32 {
        self.rotation.logical_size().0 as u32
    }

    /// Logical height
    pub fn height(&self) -> u32 {
        self.rotation.logical_size().1 as u32
    }

    /// Byte index and bit mask for a logical coordinate
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        let (px, py) = self.rotation.to_physical(x, y)?;
        Some((px + (py / 8) * LCD_WIDTH, 1 << (py % 8)))
    }

    /// Set or clear one pixel; out-of-range coordinates are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
        if let Some((index, mask)) = self.locate(x, y) {
            if color.is_on() {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }

    /// Read one pixel; out-of-range coordinates read as `Off`
    pub fn get_pixel(&self, x: i32, y: i32) -> BinaryColor {
        match self.locate(x, y) {
            Some((index, mask)) if self.buffer[index] & mask != 0 => BinaryColor::On,
            _ => BinaryColor::Off,
        }
    }

    /// Clear every pixel
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: BinaryColor) {
        self.buffer.fill(if color.is_on() { 0xFF } else { 0x00 });
    }

    /// Raw band data in transfer order
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}
