//! External interrupt line routing
//!
//! Buttons are plain GPIO inputs routed to EXTI lines 0-15 by SYSCFG. The
//! RTC wakeup event is hard-wired to line 20. Only the interrupt mask and
//! edge selection are touched here; the NVIC side is left to the firmware.

use embassy_stm32::pac;
use minicon_hal::PinId;

/// EXTI line carrying the RTC wakeup event
pub const RTC_WAKEUP_LINE: usize = 20;

/// Which edge raises the interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

/// Route `pin` to EXTI line `pin.pin` and unmask it
///
/// The line is cleared of any stale pending edge first.
pub fn route_pin(pin: PinId, edge: Edge) {
    let line = pin.pin as usize;

    pac::RCC.apb2enr().modify(|w| w.set_syscfgen(true));
    pac::SYSCFG
        .exticr(line / 4)
        .modify(|w| w.set_exti(line % 4, pin.port_index()));

    pac::EXTI
        .rtsr(0)
        .modify(|w| w.set_line(line, edge == Edge::Rising));
    pac::EXTI
        .ftsr(0)
        .modify(|w| w.set_line(line, edge == Edge::Falling));
    clear_pending(line);
    pac::EXTI.imr(0).modify(|w| w.set_line(line, true));
}

/// Unmask the RTC wakeup line on its rising edge
pub fn enable_rtc_wakeup_line() {
    pac::EXTI.rtsr(0).modify(|w| w.set_line(RTC_WAKEUP_LINE, true));
    clear_pending(RTC_WAKEUP_LINE);
    pac::EXTI.imr(0).modify(|w| w.set_line(RTC_WAKEUP_LINE, true));
}

/// Whether `line` has a pending edge
pub fn is_pending(line: usize) -> bool {
    pac::EXTI.pr(0).read().line(line)
}

/// Clear a pending edge on `line`
pub fn clear_pending(line: usize) {
    // Write-one-to-clear; zeros leave other lines alone
    pac::EXTI.pr(0).write(|w| w.set_line(line, true));
}
