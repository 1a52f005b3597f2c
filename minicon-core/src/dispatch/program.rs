//! Top-level event handler contract

use super::Context;
use crate::events::Event;

/// A top-level application
///
/// `D` is the display type handlers draw on.
pub trait Program<D> {
    /// Called each time the program becomes the one being run, before its
    /// first event
    fn init(&mut self, cx: &mut Context<'_, D>) {
        let _ = cx;
    }

    /// Handle one event
    ///
    /// Returns a follow-up: [`Event::None`] to carry on, [`Event::Close`]
    /// to leave the loop, or any other event to have it queued and
    /// delivered later.
    fn handle_event(&mut self, event: Event, cx: &mut Context<'_, D>) -> Event;
}
