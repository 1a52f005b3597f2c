//! `embedded-graphics` adapter
//!
//! Lets shapes, text and images from `embedded-graphics` be drawn onto any
//! [`PixelDisplay`]. Drawing never fails; off-screen pixels are dropped.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

use crate::backend::PixelDisplay;

/// Draw target borrowing a [`PixelDisplay`]
pub struct Canvas<'a, D: PixelDisplay + ?Sized> {
    display: &'a mut D,
}

impl<'a, D: PixelDisplay + ?Sized> Canvas<'a, D> {
    pub fn new(display: &'a mut D) -> Self {
        Self { display }
    }
}

impl<D: PixelDisplay + ?Sized> OriginDimensions for Canvas<'_, D> {
    fn size(&self) -> Size {
        Size::new(self.display.width(), self.display.height())
    }
}

impl<D: PixelDisplay + ?Sized> DrawTarget for Canvas<'_, D> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.display.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.display.clear();
        if color.is_on() {
            let (w, h) = (self.display.width() as i32, self.display.height() as i32);
            for y in 0..h {
                for x in 0..w {
                    self.display.set_pixel(x, y, BinaryColor::On);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DisplayError;
    use crate::framebuffer::{FrameBuffer, Rotation};
    use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};

    /// Buffer-only display
    struct Offscreen {
        fb: FrameBuffer,
        flushes: u32,
    }

    impl Offscreen {
        fn new() -> Self {
            Self { fb: FrameBuffer::new(), flushes: 0 }
        }
    }

    impl PixelDisplay for Offscreen {
        fn width(&self) -> u32 {
            self.fb.width()
        }

        fn height(&self) -> u32 {
            self.fb.height()
        }

        fn set_pixel(&mut self, x: i32, y: i32, color: BinaryColor) {
            self.fb.set_pixel(x, y, color);
        }

        fn get_pixel(&self, x: i32, y: i32) -> BinaryColor {
            self.fb.get_pixel(x, y)
        }

        fn clear(&mut self) {
            self.fb.clear();
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_size_follows_rotation() {
        let mut display = Offscreen::new();
        assert_eq!(Canvas::new(&mut display).size(), Size::new(84, 48));

        display.fb.set_rotation(Rotation::Deg90);
        assert_eq!(Canvas::new(&mut display).size(), Size::new(48, 84));
    }

    #[test]
    fn test_draw_line() {
        let mut display = Offscreen::new();
        Line::new(Point::new(0, 5), Point::new(83, 5))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut Canvas::new(&mut display))
            .unwrap();

        assert!((0..84).all(|x| display.get_pixel(x, 5) == BinaryColor::On));
        assert_eq!(display.get_pixel(0, 4), BinaryColor::Off);
        assert_eq!(display.flushes, 0);
    }

    #[test]
    fn test_offscreen_shape_clipped() {
        let mut display = Offscreen::new();
        Rectangle::new(Point::new(80, 44), Size::new(10, 10))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut Canvas::new(&mut display))
            .unwrap();

        assert_eq!(display.get_pixel(83, 47), BinaryColor::On);
        assert_eq!(display.get_pixel(79, 47), BinaryColor::Off);
    }

    #[test]
    fn test_clear_with_color() {
        let mut display = Offscreen::new();
        let mut canvas = Canvas::new(&mut display);

        canvas.clear(BinaryColor::On).unwrap();
        canvas.clear(BinaryColor::Off).unwrap();
        canvas.clear(BinaryColor::On).unwrap();

        assert!(display.fb.as_bytes().iter().all(|b| *b == 0xFF));
    }

    #[test]
    fn test_dyn_display() {
        let mut display = Offscreen::new();
        let target: &mut dyn PixelDisplay = &mut display;
        Pixel(Point::new(2, 3), BinaryColor::On)
            .draw(&mut Canvas::new(target))
            .unwrap();

        assert_eq!(display.get_pixel(2, 3), BinaryColor::On);
    }
}
