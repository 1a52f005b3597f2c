//! Key echo program
//!
//! Shows the name of the last button pressed, or that the console is
//! idling when the wake timer fires. Enter twice in a row goes back to
//! the launcher.

use defmt::*;
use minicon_core::{Context, Event, Program};

use super::{present, LAUNCHER};
use crate::board::Lcd;
use crate::isr;

#[derive(Default)]
pub struct KeyEcho {
    /// Consecutive Enter presses
    enters: u8,
}

impl KeyEcho {
    pub const fn new() -> Self {
        Self { enters: 0 }
    }
}

fn label(event: Event) -> &'static str {
    match event {
        Event::KeyLeft => "LEFT",
        Event::KeyRight => "RIGHT",
        Event::KeyUp => "UP",
        Event::KeyDown => "DOWN",
        Event::KeyEnter => "ENTER",
        _ => "SLEEPING...",
    }
}

fn show(lcd: &mut Lcd, text: &str) {
    lcd.clear();
    lcd.print(text);
    present(lcd);
}

impl Program<Lcd> for KeyEcho {
    fn init(&mut self, cx: &mut Context<'_, Lcd>) {
        info!("Key echo started");
        self.enters = 0;
        show(cx.display(), "PRESS A KEY");
    }

    fn handle_event(&mut self, event: Event, cx: &mut Context<'_, Lcd>) -> Event {
        trace!("Key echo: {:?}", event);

        if event == Event::KeyEnter {
            self.enters += 1;
            if self.enters >= 2 {
                cx.set_main_program(LAUNCHER);
                return Event::Close;
            }
        } else {
            self.enters = 0;
        }

        if event == Event::Timer {
            isr::report_dropped();
        }

        show(cx.display(), label(event));
        Event::None
    }
}
