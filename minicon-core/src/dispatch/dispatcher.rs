//! Program registry and event loop

use heapless::Vec;

use super::context::Requests;
use super::{Context, DispatchError, Program, ProgramId};
use crate::config::clamp_refresh;
use crate::events::{Event, EventQueue};
use crate::power::Sleeper;

/// Maximum registered programs
pub const MAX_PROGRAMS: usize = 4;

/// Default sleep interval when the queue is empty
pub const DEFAULT_REFRESH_MS: u32 = 1000;

/// Runs the active program's event loop
///
/// Owns the display and the sleeper, borrows the programs and the event
/// queue. Which program runs is decided only through
/// [`Dispatcher::set_main_program`] or [`Context::set_main_program`].
pub struct Dispatcher<'a, D, S> {
    programs: Vec<&'a mut dyn Program<D>, MAX_PROGRAMS>,
    active: Option<ProgramId>,
    display: D,
    queue: &'a EventQueue,
    sleeper: S,
    refresh_ms: u32,
}

impl<'a, D, S: Sleeper> Dispatcher<'a, D, S> {
    pub fn new(display: D, queue: &'a EventQueue, sleeper: S) -> Self {
        Self {
            programs: Vec::new(),
            active: None,
            display,
            queue,
            sleeper,
            refresh_ms: DEFAULT_REFRESH_MS,
        }
    }

    /// Add a program
    ///
    /// The first one registered is active until [`Dispatcher::set_main_program`]
    /// picks another; whichever was set last runs on the next
    /// [`Dispatcher::execute`].
    pub fn register(&mut self, program: &'a mut dyn Program<D>) -> Result<ProgramId, DispatchError> {
        let id = ProgramId::new(self.programs.len() as u8);
        self.programs
            .push(program)
            .map_err(|_| DispatchError::TooManyPrograms)?;
        if self.active.is_none() {
            self.active = Some(id);
        }
        Ok(id)
    }

    /// Make `id` the program the next [`Dispatcher::execute`] runs
    ///
    /// Unknown ids are ignored.
    pub fn set_main_program(&mut self, id: ProgramId) {
        if id.index() < self.programs.len() {
            self.active = Some(id);
        }
    }

    /// Currently active program
    pub fn active(&self) -> Option<ProgramId> {
        self.active
    }

    /// Sleep interval used when the queue is empty
    pub fn refresh_ms(&self) -> u32 {
        self.refresh_ms
    }

    /// Change the sleep interval, clamped to what the wake timer can count
    pub fn set_refresh(&mut self, interval_ms: u32) {
        self.refresh_ms = clamp_refresh(interval_ms);
    }

    pub fn display(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn sleeper(&mut self) -> &mut S {
        &mut self.sleeper
    }

    /// Run the active program until it returns [`Event::Close`]
    ///
    /// The program captured at entry keeps receiving events even if it
    /// hands control to another program; the handoff takes effect on the
    /// next call.
    pub fn execute(&mut self) -> Result<(), DispatchError> {
        let current = self.active.ok_or(DispatchError::NoActiveProgram)?;
        let Self {
            programs,
            active,
            display,
            queue,
            sleeper,
            refresh_ms,
        } = self;
        let queue: &EventQueue = queue;
        let registered = programs.len();
        let program = programs
            .get_mut(current.index())
            .ok_or(DispatchError::NoActiveProgram)?;

        let mut cx = Context::new(display, queue);
        program.init(&mut cx);
        apply(cx.into_requests(), registered, active, refresh_ms);

        loop {
            let event = match queue.get() {
                Some(Event::None) => continue,
                Some(event) => event,
                None => {
                    // A skipped sleep just polls again; the sleeper reports it
                    sleeper.sleep(*refresh_ms)?;
                    continue;
                }
            };

            let mut cx = Context::new(display, queue);
            let follow_up = program.handle_event(event, &mut cx);
            apply(cx.into_requests(), registered, active, refresh_ms);

            match follow_up {
                Event::None => {}
                Event::Close => return Ok(()),
                other => {
                    queue.post(other);
                }
            }
        }
    }

    /// Run programs forever
    ///
    /// Each time a program closes, the then-active program is run. Errors
    /// are passed to `fatal`.
    pub fn run(&mut self, fatal: fn(DispatchError) -> !) -> ! {
        loop {
            if let Err(e) = self.execute() {
                fatal(e);
            }
        }
    }
}

/// Apply handler requests that concern the dispatcher
///
/// Focus requests are handled by windowed programs; one left over here
/// means the program has no windows and it is dropped.
fn apply(requests: Requests, registered: usize, active: &mut Option<ProgramId>, refresh_ms: &mut u32) {
    if let Some(id) = requests.program {
        if id.index() < registered {
            *active = Some(id);
        }
    }
    if let Some(interval_ms) = requests.refresh_ms {
        *refresh_ms = interval_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::{PowerError, SleepOutcome};
    use minicon_hal::TimerError;
    use std::vec::Vec as StdVec;

    /// Display stand-in that records what handlers did
    type Log = StdVec<&'static str>;

    /// Sleeper that plays back one event per sleep, as an interrupt would
    struct ScriptedSleeper<'q> {
        queue: &'q EventQueue,
        wakeups: StdVec<Event>,
        intervals: StdVec<u32>,
        fail: bool,
        /// Sleeps to report as skipped before sleeping for real
        skips: usize,
    }

    impl<'q> ScriptedSleeper<'q> {
        fn new(queue: &'q EventQueue, wakeups: &[Event]) -> Self {
            let mut wakeups = wakeups.to_vec();
            wakeups.reverse();
            Self {
                queue,
                wakeups,
                intervals: StdVec::new(),
                fail: false,
                skips: 0,
            }
        }
    }

    impl Sleeper for ScriptedSleeper<'_> {
        fn sleep(&mut self, interval_ms: u32) -> Result<SleepOutcome, PowerError> {
            self.intervals.push(interval_ms);
            if self.fail {
                return Err(PowerError::DisarmFailed(TimerError::Timeout));
            }
            if self.skips > 0 {
                self.skips -= 1;
                return Ok(SleepOutcome::Skipped(TimerError::Timeout));
            }
            if let Some(event) = self.wakeups.pop() {
                self.queue.put(event);
            }
            Ok(SleepOutcome::Slept)
        }
    }

    /// Closes on Enter, optionally handing off first
    struct Closer {
        name: &'static str,
        hand_to: Option<ProgramId>,
        events: StdVec<Event>,
        inits: u32,
    }

    impl Closer {
        fn new(name: &'static str, hand_to: Option<ProgramId>) -> Self {
            Self {
                name,
                hand_to,
                events: StdVec::new(),
                inits: 0,
            }
        }
    }

    impl Program<Log> for Closer {
        fn init(&mut self, cx: &mut Context<'_, Log>) {
            self.inits += 1;
            cx.display().push(self.name);
        }

        fn handle_event(&mut self, event: Event, cx: &mut Context<'_, Log>) -> Event {
            self.events.push(event);
            match event {
                Event::KeyEnter => {
                    if let Some(next) = self.hand_to {
                        cx.set_main_program(next);
                    }
                    Event::Close
                }
                Event::KeyUp => Event::Custom(1),
                Event::Custom(1) => Event::Close,
                Event::KeyDown => {
                    cx.set_refresh(250);
                    Event::None
                }
                _ => Event::None,
            }
        }
    }

    #[test]
    fn test_execute_without_program() {
        let queue: EventQueue = EventQueue::new();
        let sleeper = ScriptedSleeper::new(&queue, &[]);
        let mut dispatcher: Dispatcher<'_, Log, _> = Dispatcher::new(Log::new(), &queue, sleeper);

        assert_eq!(dispatcher.execute(), Err(DispatchError::NoActiveProgram));
    }

    #[test]
    fn test_last_selected_program_runs() {
        let queue: EventQueue = EventQueue::new();
        let mut a = Closer::new("a", None);
        let mut b = Closer::new("b", None);
        let sleeper = ScriptedSleeper::new(&queue, &[]);
        let mut dispatcher = Dispatcher::new(Log::new(), &queue, sleeper);

        let a_id = dispatcher.register(&mut a).unwrap();
        let b_id = dispatcher.register(&mut b).unwrap();
        assert_eq!(dispatcher.active(), Some(a_id));

        dispatcher.set_main_program(b_id);
        assert_eq!(dispatcher.active(), Some(b_id));

        // Unknown id ignored
        dispatcher.set_main_program(ProgramId::new(7));
        assert_eq!(dispatcher.active(), Some(b_id));
    }

    #[test]
    fn test_program_table_full() {
        let queue: EventQueue = EventQueue::new();
        let mut programs: StdVec<Closer> = (0..=MAX_PROGRAMS).map(|_| Closer::new("p", None)).collect();
        let sleeper = ScriptedSleeper::new(&queue, &[]);
        let mut dispatcher = Dispatcher::new(Log::new(), &queue, sleeper);

        let mut results = StdVec::new();
        for program in programs.iter_mut() {
            results.push(dispatcher.register(program));
        }

        assert!(results[..MAX_PROGRAMS].iter().all(|r| r.is_ok()));
        assert_eq!(results[MAX_PROGRAMS], Err(DispatchError::TooManyPrograms));
    }

    #[test]
    fn test_handoff_runs_new_program_next() {
        let queue: EventQueue = EventQueue::new();
        let mut a = Closer::new("a", Some(ProgramId::new(1)));
        let mut b = Closer::new("b", None);
        let sleeper = ScriptedSleeper::new(&queue, &[]);
        let mut dispatcher = Dispatcher::new(Log::new(), &queue, sleeper);
        dispatcher.register(&mut a).unwrap();
        let b_id = dispatcher.register(&mut b).unwrap();

        queue.put(Event::KeyLeft);
        queue.put(Event::KeyEnter);
        queue.put(Event::KeyRight);
        dispatcher.execute().unwrap();
        assert_eq!(dispatcher.active(), Some(b_id));

        queue.put(Event::KeyEnter);
        dispatcher.execute().unwrap();

        assert_eq!(dispatcher.display(), &["a", "b"]);
        drop(dispatcher);
        assert_eq!(a.events, [Event::KeyLeft, Event::KeyEnter]);
        assert_eq!(b.events, [Event::KeyRight, Event::KeyEnter]);
        assert_eq!((a.inits, b.inits), (1, 1));
    }

    #[test]
    fn test_handoff_to_unknown_program_ignored() {
        let queue: EventQueue = EventQueue::new();
        let mut a = Closer::new("a", Some(ProgramId::new(3)));
        let sleeper = ScriptedSleeper::new(&queue, &[]);
        let mut dispatcher = Dispatcher::new(Log::new(), &queue, sleeper);
        let a_id = dispatcher.register(&mut a).unwrap();

        queue.put(Event::KeyEnter);
        dispatcher.execute().unwrap();
        assert_eq!(dispatcher.active(), Some(a_id));
    }

    #[test]
    fn test_follow_up_is_reposted() {
        let queue: EventQueue = EventQueue::new();
        let mut a = Closer::new("a", None);
        let sleeper = ScriptedSleeper::new(&queue, &[]);
        let mut dispatcher = Dispatcher::new(Log::new(), &queue, sleeper);
        dispatcher.register(&mut a).unwrap();

        queue.put(Event::KeyUp);
        queue.put(Event::KeyLeft);
        dispatcher.execute().unwrap();

        drop(dispatcher);
        // The follow-up queues behind what was already pending
        assert_eq!(a.events, [Event::KeyUp, Event::KeyLeft, Event::Custom(1)]);
    }

    #[test]
    fn test_sleeps_when_queue_empty() {
        let queue: EventQueue = EventQueue::new();
        let mut a = Closer::new("a", None);
        let sleeper = ScriptedSleeper::new(&queue, &[Event::Timer, Event::KeyDown, Event::Timer, Event::KeyEnter]);
        let mut dispatcher = Dispatcher::new(Log::new(), &queue, sleeper);
        dispatcher.register(&mut a).unwrap();

        dispatcher.execute().unwrap();

        // KeyDown changed the refresh interval for later sleeps
        assert_eq!(dispatcher.sleeper().intervals, [1000, 1000, 250, 250]);
        assert_eq!(dispatcher.refresh_ms(), 250);
        drop(dispatcher);
        assert_eq!(a.events, [Event::Timer, Event::KeyDown, Event::Timer, Event::KeyEnter]);
    }

    #[test]
    fn test_posted_none_is_skipped() {
        let queue: EventQueue = EventQueue::new();
        let mut a = Closer::new("a", None);
        let sleeper = ScriptedSleeper::new(&queue, &[]);
        let mut dispatcher = Dispatcher::new(Log::new(), &queue, sleeper);
        dispatcher.register(&mut a).unwrap();

        queue.put(Event::None);
        queue.put(Event::KeyEnter);
        dispatcher.execute().unwrap();

        drop(dispatcher);
        assert_eq!(a.events, [Event::KeyEnter]);
    }

    #[test]
    fn test_sleep_failure_propagates() {
        let queue: EventQueue = EventQueue::new();
        let mut a = Closer::new("a", None);
        let mut sleeper = ScriptedSleeper::new(&queue, &[]);
        sleeper.fail = true;
        let mut dispatcher = Dispatcher::new(Log::new(), &queue, sleeper);
        dispatcher.register(&mut a).unwrap();

        assert_eq!(
            dispatcher.execute(),
            Err(DispatchError::Power(PowerError::DisarmFailed(TimerError::Timeout)))
        );
    }

    #[test]
    fn test_skipped_sleep_keeps_polling() {
        let queue: EventQueue = EventQueue::new();
        let mut a = Closer::new("a", None);
        let mut sleeper = ScriptedSleeper::new(&queue, &[Event::KeyLeft, Event::KeyEnter]);
        sleeper.skips = 3;
        let mut dispatcher = Dispatcher::new(Log::new(), &queue, sleeper);
        dispatcher.register(&mut a).unwrap();

        dispatcher.execute().unwrap();

        assert_eq!(dispatcher.sleeper().intervals, [1000; 5]);
        drop(dispatcher);
        assert_eq!(a.events, [Event::KeyLeft, Event::KeyEnter]);
    }

    #[test]
    fn test_refresh_clamped_to_timer_range() {
        use crate::config::{MAX_REFRESH_MS, MIN_REFRESH_MS};

        let queue: EventQueue = EventQueue::new();
        let sleeper = ScriptedSleeper::new(&queue, &[]);
        let mut dispatcher: Dispatcher<'_, Log, _> = Dispatcher::new(Log::new(), &queue, sleeper);

        dispatcher.set_refresh(0);
        assert_eq!(dispatcher.refresh_ms(), MIN_REFRESH_MS);
        dispatcher.set_refresh(30_000);
        assert_eq!(dispatcher.refresh_ms(), MAX_REFRESH_MS);
    }

    /// Sets a zero refresh on Up, closes on Enter
    struct ZeroRefresh;

    impl Program<Log> for ZeroRefresh {
        fn handle_event(&mut self, event: Event, cx: &mut Context<'_, Log>) -> Event {
            match event {
                Event::KeyEnter => Event::Close,
                _ => {
                    cx.set_refresh(0);
                    Event::None
                }
            }
        }
    }

    #[test]
    fn test_handler_refresh_clamped() {
        use crate::config::MIN_REFRESH_MS;

        let queue: EventQueue = EventQueue::new();
        let mut program = ZeroRefresh;
        let sleeper = ScriptedSleeper::new(&queue, &[Event::KeyEnter]);
        let mut dispatcher = Dispatcher::new(Log::new(), &queue, sleeper);
        dispatcher.register(&mut program).unwrap();

        queue.put(Event::KeyUp);
        dispatcher.execute().unwrap();

        assert_eq!(dispatcher.sleeper().intervals, [MIN_REFRESH_MS]);
    }
}
