//! Events and the interrupt-to-main-loop queue
//!
//! Interrupt handlers push events with [`EventQueue::put`]; the main loop
//! pops them with [`EventQueue::get`] and queues its own with
//! [`EventQueue::post`]. All of them take `&self`, so the queue can live in
//! a plain `static`.
//!
//! # Concurrency
//!
//! The write side is single-producer. Interrupt handlers that call `put`
//! must share one priority so they cannot preempt each other. Thread-mode
//! code may be preempted by those handlers at any point, so it writes
//! through `post`, which holds a critical section for the whole put. The
//! consumer is the main loop.
//!
//! Cursors run freely over `0..2N` so that full (`tail - head == N`) and
//! empty (`head == tail`) are distinguishable without a spare slot. A slot
//! is written before the Release store of `tail` that publishes it, and
//! read before the Release store of `head` that frees it.

use portable_atomic::{AtomicU16, AtomicUsize, Ordering};

/// Default queue depth
pub const DEFAULT_CAPACITY: usize = 16;

/// One input or timer notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Nothing happened / nothing to do
    #[default]
    None,
    /// Leave the current program's loop
    Close,
    /// Periodic wake timer fired
    Timer,

    // Buttons
    KeyLeft,
    KeyUp,
    KeyDown,
    KeyRight,
    KeyEnter,

    /// Application defined
    Custom(u8),
}

impl Event {
    /// Check if this event is a button press
    pub fn is_key(&self) -> bool {
        matches!(
            self,
            Event::KeyLeft | Event::KeyUp | Event::KeyDown | Event::KeyRight | Event::KeyEnter
        )
    }

    /// Pack into 16 bits: tag in the low byte, payload in the high byte
    pub const fn to_bits(self) -> u16 {
        match self {
            Event::None => 0,
            Event::Close => 1,
            Event::Timer => 2,
            Event::KeyLeft => 3,
            Event::KeyUp => 4,
            Event::KeyDown => 5,
            Event::KeyRight => 6,
            Event::KeyEnter => 7,
            Event::Custom(value) => 8 | (value as u16) << 8,
        }
    }

    /// Unpack from [`Event::to_bits`]; unknown tags decode as `None`
    pub const fn from_bits(bits: u16) -> Self {
        match bits & 0xFF {
            1 => Event::Close,
            2 => Event::Timer,
            3 => Event::KeyLeft,
            4 => Event::KeyUp,
            5 => Event::KeyDown,
            6 => Event::KeyRight,
            7 => Event::KeyEnter,
            8 => Event::Custom((bits >> 8) as u8),
            _ => Event::None,
        }
    }
}

/// Bounded lock-free event queue
///
/// When full, new events are dropped and the queued ones are kept.
pub struct EventQueue<const N: usize = DEFAULT_CAPACITY> {
    slots: [AtomicU16; N],
    /// Next slot to read, owned by the consumer
    head: AtomicUsize,
    /// Next slot to write, owned by the producer
    tail: AtomicUsize,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    const NON_EMPTY: () = assert!(N > 0, "event queue needs at least one slot");

    /// Create an empty queue
    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self {
            slots: [const { AtomicU16::new(0) }; N],
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
        }
    }

    /// Cursor after `cursor`, wrapping at `2N`
    const fn advance(cursor: usize) -> usize {
        if cursor + 1 == 2 * N {
            0
        } else {
            cursor + 1
        }
    }

    /// Events between `head` and `tail`
    const fn distance(head: usize, tail: usize) -> usize {
        (tail + 2 * N - head) % (2 * N)
    }

    /// Queue an event; returns `false` if the queue was full and the event
    /// was dropped
    ///
    /// Safe to call from interrupt context.
    pub fn put(&self, event: Event) -> bool {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if Self::distance(head, tail) == N {
            return false;
        }

        self.slots[tail % N].store(event.to_bits(), Ordering::Relaxed);
        self.tail.store(Self::advance(tail), Ordering::Release);
        true
    }

    /// Queue an event from thread mode; returns `false` if it was dropped
    ///
    /// Interrupts are masked for the duration of the put, so an interrupt
    /// handler calling [`EventQueue::put`] cannot claim the same slot.
    pub fn post(&self, event: Event) -> bool {
        critical_section::with(|_| self.put(event))
    }

    /// Take the oldest event, if any. Never blocks.
    pub fn get(&self) -> Option<Event> {
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if head == tail {
            return None;
        }

        let bits = self.slots[head % N].load(Ordering::Relaxed);
        self.head.store(Self::advance(head), Ordering::Release);
        Some(Event::from_bits(bits))
    }

    /// Check if there is nothing to read
    pub fn is_empty(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail.load(Ordering::Acquire);
        Self::distance(head, tail)
    }

    /// Maximum number of queued events
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Drop everything queued (consumer side only)
    pub fn clear(&self) {
        let tail = self.tail.load(Ordering::Acquire);
        self.head.store(tail, Ordering::Release);
    }
}
