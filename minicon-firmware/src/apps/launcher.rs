//! Launcher program
//!
//! A menu window to pick what to run and a contrast window to tune the
//! panel, sharing one [`Settings`] state.

use core::fmt::Write;

use defmt::{debug, warn};
use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use minicon_core::{Context, Event, Window, WindowId, WindowedProgram};
use minicon_display::pcd8544::MAX_CONTRAST;
use minicon_display::{BinaryColor, DisplayMode};

use super::{present, KEY_ECHO};
use crate::board::Lcd;
use crate::isr;

/// Menu window, added first
pub const MENU: WindowId = WindowId::new(0);

/// Contrast window
pub const CONTRAST: WindowId = WindowId::new(1);

/// Text row height in pixels
const ROW_HEIGHT: i32 = 8;

/// Rows above the first menu item
const MENU_TOP: i32 = 2;

const ITEMS: [&str; 3] = ["Key echo", "Contrast", "Invert"];

pub type Launcher<'w> = WindowedProgram<'w, Lcd, Settings, 2>;

/// State shared by the launcher windows
pub struct Settings {
    selected: usize,
    contrast: u8,
    inverted: bool,
}

impl Settings {
    pub fn new(contrast: u8) -> Self {
        Self {
            selected: 0,
            contrast: contrast.min(MAX_CONTRAST),
            inverted: false,
        }
    }
}

fn title(lcd: &mut Lcd, text: &str) {
    lcd.clear();
    lcd.print(text);
}

pub struct MenuWindow;

impl MenuWindow {
    fn activate(&mut self, settings: &mut Settings, cx: &mut Context<'_, Lcd>) -> Event {
        match settings.selected {
            0 => {
                cx.set_main_program(KEY_ECHO);
                return Event::Close;
            }
            1 => cx.set_main_window(CONTRAST),
            _ => {
                settings.inverted = !settings.inverted;
                let mode = if settings.inverted {
                    DisplayMode::Inverted
                } else {
                    DisplayMode::Normal
                };
                if let Err(e) = cx.display().set_display_mode(mode) {
                    warn!("Display mode change failed: {:?}", e);
                }
            }
        }
        Event::None
    }
}

impl Window<Lcd, Settings> for MenuWindow {
    fn draw(&mut self, settings: &mut Settings, cx: &mut Context<'_, Lcd>) {
        let lcd = cx.display();
        title(lcd, "MINICON");

        let width = lcd.framebuffer().width();
        for (row, item) in ITEMS.iter().enumerate() {
            let y = (MENU_TOP + row as i32) * ROW_HEIGHT;
            if row == settings.selected {
                let mut canvas = lcd.canvas();
                let _ = Rectangle::new(Point::new(0, y), Size::new(width, ROW_HEIGHT as u32))
                    .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                    .draw(&mut canvas);
                let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::Off);
                let _ = Text::with_baseline(item, Point::new(2, y), style, Baseline::Top)
                    .draw(&mut canvas);
            } else {
                lcd.set_cursor(Point::new(2, y));
                lcd.print(item);
            }
        }
        present(lcd);
    }

    fn handle_event(&mut self, event: Event, settings: &mut Settings, cx: &mut Context<'_, Lcd>) -> Event {
        match event {
            Event::KeyUp => {
                settings.selected = (settings.selected + ITEMS.len() - 1) % ITEMS.len();
                self.draw(settings, cx);
            }
            Event::KeyDown => {
                settings.selected = (settings.selected + 1) % ITEMS.len();
                self.draw(settings, cx);
            }
            Event::KeyEnter | Event::KeyRight => return self.activate(settings, cx),
            Event::Timer => isr::report_dropped(),
            _ => {}
        }
        Event::None
    }
}

pub struct ContrastWindow;

impl Window<Lcd, Settings> for ContrastWindow {
    fn draw(&mut self, settings: &mut Settings, cx: &mut Context<'_, Lcd>) {
        let lcd = cx.display();
        title(lcd, "CONTRAST");

        let mut value: String<8> = String::new();
        let _ = write!(value, "{}", settings.contrast);
        lcd.set_cursor(Point::new(2, 2 * ROW_HEIGHT));
        lcd.print(&value);

        // Bar gauge
        let width = lcd.framebuffer().width() - 4;
        let filled = width * u32::from(settings.contrast) / u32::from(MAX_CONTRAST);
        let mut canvas = lcd.canvas();
        let top = 4 * ROW_HEIGHT;
        let _ = Rectangle::new(Point::new(2, top), Size::new(width, 6))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut canvas);
        let _ = Rectangle::new(Point::new(2, top), Size::new(filled, 6))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut canvas);

        present(lcd);
    }

    fn handle_event(&mut self, event: Event, settings: &mut Settings, cx: &mut Context<'_, Lcd>) -> Event {
        let contrast = match event {
            Event::KeyUp => (settings.contrast + 1).min(MAX_CONTRAST),
            Event::KeyDown => settings.contrast.saturating_sub(1),
            Event::KeyLeft | Event::KeyEnter => {
                cx.set_main_window(MENU);
                return Event::None;
            }
            _ => return Event::None,
        };

        if contrast != settings.contrast {
            settings.contrast = contrast;
            debug!("Contrast set to {}", contrast);
            if let Err(e) = cx.display().set_contrast(contrast) {
                warn!("Contrast update failed: {:?}", e);
            }
            self.draw(settings, cx);
        }
        Event::None
    }
}
