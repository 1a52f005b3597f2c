//! Windows and the program that hosts them
//!
//! A [`WindowedProgram`] owns some shared state `S` and a fixed set of
//! windows. One window has focus at a time and receives every event.
//! Moving focus draws the newly focused window straight away.

use heapless::Vec;

use super::{Context, DispatchError, Program, WindowId};
use crate::events::Event;

/// A focusable screen inside a [`WindowedProgram`]
pub trait Window<D, S> {
    /// Render the whole window
    fn draw(&mut self, state: &mut S, cx: &mut Context<'_, D>);

    /// Handle one event while focused
    ///
    /// The returned follow-up is passed back to the dispatcher unchanged.
    fn handle_event(&mut self, event: Event, state: &mut S, cx: &mut Context<'_, D>) -> Event;
}

/// Program made of windows sharing state `S`
pub struct WindowedProgram<'w, D, S, const N: usize = 4> {
    state: S,
    windows: Vec<&'w mut dyn Window<D, S>, N>,
    focus: Option<WindowId>,
}

impl<'w, D, S, const N: usize> WindowedProgram<'w, D, S, N> {
    pub fn new(state: S) -> Self {
        Self {
            state,
            windows: Vec::new(),
            focus: None,
        }
    }

    /// Add a window; the first one added gets focus
    pub fn add_window(&mut self, window: &'w mut dyn Window<D, S>) -> Result<WindowId, DispatchError> {
        let id = WindowId::new(self.windows.len() as u8);
        self.windows
            .push(window)
            .map_err(|_| DispatchError::TooManyWindows)?;
        if self.focus.is_none() {
            self.focus = Some(id);
        }
        Ok(id)
    }

    /// Focused window
    pub fn focus(&self) -> Option<WindowId> {
        self.focus
    }

    /// Focus window `id` and draw it
    ///
    /// Unknown ids are ignored and nothing is drawn.
    pub fn set_main_window(&mut self, id: WindowId, cx: &mut Context<'_, D>) {
        if let Some(window) = self.windows.get_mut(id.index()) {
            self.focus = Some(id);
            window.draw(&mut self.state, cx);
        }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    fn draw_focus(&mut self, cx: &mut Context<'_, D>) {
        let Some(id) = self.focus else { return };
        if let Some(window) = self.windows.get_mut(id.index()) {
            window.draw(&mut self.state, cx);
        }
    }
}

impl<D, S, const N: usize> Program<D> for WindowedProgram<'_, D, S, N> {
    fn init(&mut self, cx: &mut Context<'_, D>) {
        self.draw_focus(cx);
    }

    fn handle_event(&mut self, event: Event, cx: &mut Context<'_, D>) -> Event {
        let Some(window) = self.focus.and_then(|id| self.windows.get_mut(id.index())) else {
            return Event::None;
        };
        let follow_up = window.handle_event(event, &mut self.state, cx);

        if let Some(next) = cx.take_main_window() {
            self.set_main_window(next, cx);
        }
        follow_up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventQueue;
    use std::vec::Vec as StdVec;

    type Log = StdVec<&'static str>;

    #[derive(Default)]
    struct Shared {
        presses: u32,
    }

    /// Moves focus to `next` on Right, closes on Enter
    struct Pane {
        name: &'static str,
        next: Option<WindowId>,
        draws: u32,
    }

    impl Pane {
        fn new(name: &'static str, next: Option<WindowId>) -> Self {
            Self { name, next, draws: 0 }
        }
    }

    impl Window<Log, Shared> for Pane {
        fn draw(&mut self, _state: &mut Shared, cx: &mut Context<'_, Log>) {
            self.draws += 1;
            cx.display().push(self.name);
        }

        fn handle_event(&mut self, event: Event, state: &mut Shared, cx: &mut Context<'_, Log>) -> Event {
            state.presses += 1;
            match event {
                Event::KeyRight => {
                    if let Some(next) = self.next {
                        cx.set_main_window(next);
                    }
                    Event::None
                }
                Event::KeyEnter => Event::Close,
                _ => Event::Timer,
            }
        }
    }

    #[test]
    fn test_init_draws_focus() {
        let queue: EventQueue = EventQueue::new();
        let mut log = Log::new();
        let mut menu = Pane::new("menu", None);
        let mut program: WindowedProgram<'_, Log, Shared> = WindowedProgram::new(Shared::default());
        program.add_window(&mut menu).unwrap();

        let mut cx = Context::new(&mut log, &queue);
        program.init(&mut cx);

        assert_eq!(log, ["menu"]);
    }

    #[test]
    fn test_focus_change_draws_once() {
        let queue: EventQueue = EventQueue::new();
        let mut log = Log::new();
        let mut menu = Pane::new("menu", Some(WindowId::new(1)));
        let mut detail = Pane::new("detail", Some(WindowId::new(0)));
        let mut program: WindowedProgram<'_, Log, Shared> = WindowedProgram::new(Shared::default());
        let menu_id = program.add_window(&mut menu).unwrap();
        let detail_id = program.add_window(&mut detail).unwrap();
        assert_eq!(program.focus(), Some(menu_id));

        let mut cx = Context::new(&mut log, &queue);
        assert_eq!(program.handle_event(Event::KeyRight, &mut cx), Event::None);
        assert_eq!(program.focus(), Some(detail_id));
        // Request was consumed
        assert_eq!(cx.take_main_window(), None);

        assert_eq!(program.handle_event(Event::KeyUp, &mut cx), Event::Timer);
        assert_eq!(program.handle_event(Event::KeyRight, &mut cx), Event::None);
        assert_eq!(program.focus(), Some(menu_id));

        assert_eq!(program.state().presses, 3);
        drop(program);
        assert_eq!(log, ["detail", "menu"]);
        assert_eq!((menu.draws, detail.draws), (1, 1));
    }

    #[test]
    fn test_set_main_window_directly() {
        let queue: EventQueue = EventQueue::new();
        let mut log = Log::new();
        let mut a = Pane::new("a", None);
        let mut b = Pane::new("b", None);
        let mut program: WindowedProgram<'_, Log, Shared> = WindowedProgram::new(Shared::default());
        program.add_window(&mut a).unwrap();
        let b_id = program.add_window(&mut b).unwrap();

        let mut cx = Context::new(&mut log, &queue);
        program.set_main_window(b_id, &mut cx);
        program.set_main_window(WindowId::new(9), &mut cx);

        assert_eq!(program.focus(), Some(b_id));
        drop(program);
        assert_eq!(log, ["b"]);
    }

    #[test]
    fn test_no_windows() {
        let queue: EventQueue = EventQueue::new();
        let mut log = Log::new();
        let mut program: WindowedProgram<'_, Log, Shared> = WindowedProgram::new(Shared::default());

        let mut cx = Context::new(&mut log, &queue);
        program.init(&mut cx);
        assert_eq!(program.handle_event(Event::KeyEnter, &mut cx), Event::None);
        assert!(log.is_empty());
    }

    #[test]
    fn test_window_table_full() {
        let mut panes = [Pane::new("a", None), Pane::new("b", None), Pane::new("c", None)];
        let mut program: WindowedProgram<'_, Log, Shared, 2> = WindowedProgram::new(Shared::default());

        let [a, b, c] = &mut panes;
        assert!(program.add_window(a).is_ok());
        assert!(program.add_window(b).is_ok());
        assert_eq!(program.add_window(c).err(), Some(DispatchError::TooManyWindows));
    }
}
