//! RTC wakeup timer
//!
//! The RTC runs from the LSI oscillator and keeps counting in stop mode,
//! so its wakeup unit can end any sleep. The wakeup event reaches the core
//! through EXTI line 20 (see [`crate::exti::enable_rtc_wakeup_line`]).
//!
//! The RTC must already be clocked (LSI selected as RTC clock and the
//! backup domain enabled), which `embassy-stm32` does when `rcc.ls` is
//! configured for LSI.

use embassy_stm32::pac;
use embassy_stm32::pac::rtc::vals::Wucksel;
use minicon_hal::{TimerError, WakeTimer};

/// Nominal LSI frequency
pub const LSI_HZ: u32 = 40_000;

/// Wakeup counter rate with the /16 prescaler
pub const TICK_HZ: u32 = LSI_HZ / 16;

/// Longest interval the 16-bit wakeup counter can count at [`TICK_HZ`]
pub const MAX_INTERVAL_MS: u32 = (0x1_0000 * 1000) / TICK_HZ;

/// Polls of the write-allowed flag before giving up
const WUTWF_SPIN_LIMIT: u32 = 10_000;

/// Counter reload for `interval_ms`
///
/// The counter fires after `reload + 1` ticks.
pub fn reload_for(interval_ms: u32) -> Result<u16, TimerError> {
    if interval_ms == 0 || interval_ms > MAX_INTERVAL_MS {
        return Err(TimerError::OutOfRange);
    }
    let ticks = (interval_ms as u64 * TICK_HZ as u64 / 1000).max(1);
    Ok((ticks - 1) as u16)
}

/// One-shot wake timer on the RTC wakeup unit
pub struct RtcWakeTimer {
    armed: bool,
}

impl Default for RtcWakeTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RtcWakeTimer {
    /// Take over the RTC wakeup unit
    pub fn new() -> Self {
        Self { armed: false }
    }

    /// Whether the timer was armed and not yet disarmed
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    fn unlock() {
        pac::RTC.wpr().write(|w| w.set_key(0xCA));
        pac::RTC.wpr().write(|w| w.set_key(0x53));
    }

    fn lock() {
        pac::RTC.wpr().write(|w| w.set_key(0xFF));
    }

    /// Stop the counter and wait until its reload register is writable
    fn stop_counter() -> Result<(), TimerError> {
        pac::RTC.cr().modify(|w| {
            w.set_wute(false);
            w.set_wutie(false);
        });
        for _ in 0..WUTWF_SPIN_LIMIT {
            if pac::RTC.isr().read().wutwf() {
                return Ok(());
            }
        }
        Err(TimerError::Timeout)
    }
}

impl WakeTimer for RtcWakeTimer {
    fn arm(&mut self, interval_ms: u32) -> Result<(), TimerError> {
        let reload = reload_for(interval_ms)?;

        Self::unlock();
        let result = Self::stop_counter().map(|()| {
            pac::RTC.wutr().write(|w| w.set_wut(reload));
            pac::RTC.cr().modify(|w| w.set_wucksel(Wucksel::DIV16));
            acknowledge();
            pac::RTC.cr().modify(|w| {
                w.set_wutie(true);
                w.set_wute(true);
            });
        });
        Self::lock();

        self.armed = result.is_ok();
        result
    }

    fn disarm(&mut self) -> Result<(), TimerError> {
        Self::unlock();
        let result = Self::stop_counter();
        acknowledge();
        Self::lock();

        if result.is_ok() {
            self.armed = false;
        }
        result
    }
}

/// Clear the wakeup flag and its EXTI pending bit
///
/// Called from the RTC wakeup interrupt handler.
pub fn acknowledge() {
    pac::RTC.isr().modify(|w| w.set_wutf(false));
    crate::exti::clear_pending(crate::exti::RTC_WAKEUP_LINE);
}
