//! Per-call handler context

use super::{ProgramId, WindowId};
use crate::config::clamp_refresh;
use crate::events::{Event, EventQueue};

/// Requests a handler made during one call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Requests {
    pub program: Option<ProgramId>,
    pub window: Option<WindowId>,
    pub refresh_ms: Option<u32>,
}

/// What a program or window can reach while handling a call
///
/// Gives access to the display and the event queue, and records
/// transfer-of-control requests. Requests take effect after the handler
/// returns; the last request of each kind wins.
pub struct Context<'a, D> {
    display: &'a mut D,
    queue: &'a EventQueue,
    requests: Requests,
}

impl<'a, D> Context<'a, D> {
    pub fn new(display: &'a mut D, queue: &'a EventQueue) -> Self {
        Self {
            display,
            queue,
            requests: Requests::default(),
        }
    }

    /// The display
    pub fn display(&mut self) -> &mut D {
        self.display
    }

    /// Queue an event for later delivery; `false` if the queue is full
    pub fn post(&self, event: Event) -> bool {
        self.queue.post(event)
    }

    /// Make `id` the active program
    ///
    /// The current program keeps receiving events until it returns
    /// [`Event::Close`]; the next run of the loop starts `id`.
    pub fn set_main_program(&mut self, id: ProgramId) {
        self.requests.program = Some(id);
    }

    /// Move focus to window `id` of the current program and draw it
    pub fn set_main_window(&mut self, id: WindowId) {
        self.requests.window = Some(id);
    }

    /// Change how long the loop sleeps when there is nothing to do
    ///
    /// Clamped to what the wake timer can count.
    pub fn set_refresh(&mut self, interval_ms: u32) {
        self.requests.refresh_ms = Some(clamp_refresh(interval_ms));
    }

    /// Take a pending focus request, leaving none behind
    pub fn take_main_window(&mut self) -> Option<WindowId> {
        self.requests.window.take()
    }

    pub(crate) fn into_requests(self) -> Requests {
        self.requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_request_wins() {
        let queue: EventQueue = EventQueue::new();
        let mut display = ();
        let mut cx = Context::new(&mut display, &queue);

        cx.set_main_program(ProgramId::new(1));
        cx.set_main_program(ProgramId::new(2));
        cx.set_refresh(100);

        let requests = cx.into_requests();
        assert_eq!(requests.program, Some(ProgramId::new(2)));
        assert_eq!(requests.refresh_ms, Some(100));
        assert_eq!(requests.window, None);
    }

    #[test]
    fn test_refresh_clamped() {
        use crate::config::{MAX_REFRESH_MS, MIN_REFRESH_MS};

        let queue: EventQueue = EventQueue::new();
        let mut display = ();
        let mut cx = Context::new(&mut display, &queue);

        cx.set_refresh(0);
        assert_eq!(cx.requests.refresh_ms, Some(MIN_REFRESH_MS));
        cx.set_refresh(30_000);
        assert_eq!(cx.into_requests().refresh_ms, Some(MAX_REFRESH_MS));
    }

    #[test]
    fn test_take_main_window() {
        let queue: EventQueue = EventQueue::new();
        let mut display = ();
        let mut cx = Context::new(&mut display, &queue);

        cx.set_main_window(WindowId::new(3));
        assert_eq!(cx.take_main_window(), Some(WindowId::new(3)));
        assert_eq!(cx.take_main_window(), None);
    }

    #[test]
    fn test_post() {
        let queue: EventQueue = EventQueue::new();
        let mut display = ();
        let cx = Context::new(&mut display, &queue);

        assert!(cx.post(Event::Timer));
        assert_eq!(queue.get(), Some(Event::Timer));
    }
}
