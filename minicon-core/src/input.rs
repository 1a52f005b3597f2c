//! Button line mapping
//!
//! Buttons are wired to external interrupt lines. The interrupt handler
//! only knows which line fired; this table turns that into an [`Event`].

use crate::events::{Event, EventQueue};

/// Number of external interrupt lines shared by GPIO pins
pub const EXTI_LINES: usize = 16;

/// Which event each external interrupt line produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonMap {
    lines: [Option<Event>; EXTI_LINES],
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self::CONSOLE
    }
}

impl ButtonMap {
    /// Board layout: D-pad and enter on lines 3..=7
    pub const CONSOLE: ButtonMap = ButtonMap::new()
        .with(3, Event::KeyDown)
        .with(4, Event::KeyRight)
        .with(5, Event::KeyEnter)
        .with(6, Event::KeyLeft)
        .with(7, Event::KeyUp);

    /// Map with no lines assigned
    pub const fn new() -> Self {
        Self {
            lines: [None; EXTI_LINES],
        }
    }

    /// Assign `event` to `line`; lines past the last EXTI line are ignored
    pub const fn with(mut self, line: u8, event: Event) -> Self {
        if (line as usize) < EXTI_LINES {
            self.lines[line as usize] = Some(event);
        }
        self
    }

    /// Event for a line, if one is assigned
    pub fn event(&self, line: u8) -> Option<Event> {
        self.lines.get(line as usize).copied().flatten()
    }

    /// Queue the event for an edge on `line` from its interrupt handler
    ///
    /// `None` for an unassigned line, otherwise whether the queue took the
    /// event.
    pub fn on_edge<const N: usize>(&self, line: u8, queue: &EventQueue<N>) -> Option<bool> {
        self.event(line).map(|event| queue.put(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_layout() {
        let map = ButtonMap::CONSOLE;
        assert_eq!(map.event(3), Some(Event::KeyDown));
        assert_eq!(map.event(4), Some(Event::KeyRight));
        assert_eq!(map.event(5), Some(Event::KeyEnter));
        assert_eq!(map.event(6), Some(Event::KeyLeft));
        assert_eq!(map.event(7), Some(Event::KeyUp));
        assert_eq!(map.event(0), None);
        assert_eq!(map.event(200), None);
        assert!((3..=7).all(|line| map.event(line).is_some_and(|e| e.is_key())));
    }

    #[test]
    fn test_on_edge_posts() {
        let queue: EventQueue<2> = EventQueue::new();
        let map = ButtonMap::default();

        assert_eq!(map.on_edge(6, &queue), Some(true));
        assert_eq!(map.on_edge(9, &queue), None);
        assert_eq!(map.on_edge(7, &queue), Some(true));
        // Full
        assert_eq!(map.on_edge(5, &queue), Some(false));

        assert_eq!(queue.get(), Some(Event::KeyLeft));
        assert_eq!(queue.get(), Some(Event::KeyUp));
        assert_eq!(queue.get(), None);
    }

    #[test]
    fn test_out_of_range_line_ignored() {
        let map = ButtonMap::new().with(16, Event::KeyUp);
        assert_eq!(map, ButtonMap::new());
    }
}
