//! Interrupt handlers
//!
//! Every handler here feeds the event queue, so all of them run at the same
//! NVIC priority and never preempt each other. That keeps the queue
//! single-producer.

use cortex_m_rt::exception;
use defmt::*;
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use minicon_core::input::ButtonMap;
use minicon_core::{Event, EventQueue};
use minicon_hal_stm32f3::{exti, rtc};
use portable_atomic::{AtomicU32, Ordering};

/// Events from interrupt context to the main loop
pub static EVENTS: EventQueue = EventQueue::new();

/// Which button line produces which key
const BUTTONS: ButtonMap = ButtonMap::CONSOLE;

/// Priority shared by all event producers
const EVENT_PRIORITY: Priority = Priority::P2;

/// Milliseconds of system tick; stands still while the tick is suspended
static UPTIME_MS: AtomicU32 = AtomicU32::new(0);

/// Events lost to a full queue
static DROPPED: AtomicU32 = AtomicU32::new(0);

defmt::timestamp!("{=u32:ms}", UPTIME_MS.load(Ordering::Relaxed));

/// Give all event interrupts the same priority and unmask them
pub fn enable() {
    let irqs = [
        interrupt::EXTI3,
        interrupt::EXTI4,
        interrupt::EXTI9_5,
        interrupt::RTC_WKUP,
    ];
    for irq in irqs {
        irq.set_priority(EVENT_PRIORITY);
        irq.unpend();
        // SAFETY: the handlers below only touch the event queue and EXTI/RTC
        // flags, and share one priority level.
        unsafe { irq.enable() };
    }
}

fn count_drop(accepted: bool) {
    if !accepted {
        DROPPED.fetch_add(1, Ordering::Relaxed);
    }
}

fn on_button_line(line: usize) {
    exti::clear_pending(line);
    if let Some(accepted) = BUTTONS.on_edge(line as u8, &EVENTS) {
        count_drop(accepted);
    }
}

#[interrupt]
fn EXTI3() {
    on_button_line(3);
}

#[interrupt]
fn EXTI4() {
    on_button_line(4);
}

#[interrupt]
fn EXTI9_5() {
    for line in 5..=9 {
        if exti::is_pending(line) {
            on_button_line(line);
        }
    }
}

#[interrupt]
fn RTC_WKUP() {
    rtc::acknowledge();
    count_drop(EVENTS.put(Event::Timer));
}

#[exception]
fn SysTick() {
    UPTIME_MS.fetch_add(1, Ordering::Relaxed);
}

/// Log and reset the dropped-event counter
pub fn report_dropped() {
    let dropped = DROPPED.swap(0, Ordering::Relaxed);
    if dropped > 0 {
        warn!("Event queue full, dropped {} events", dropped);
    }
}
