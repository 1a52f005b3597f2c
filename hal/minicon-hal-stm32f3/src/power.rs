//! Core sleep primitives for STM32F3
//!
//! Light sleep is a plain WFI with the system tick interrupt masked. Stop
//! mode additionally sets SLEEPDEEP with the regulator in low-power mode;
//! on wake the core runs from HSI and the clock tree captured at start-up
//! has to be brought back with [`CorePower::restore_clocks`].

use cortex_m::peripheral::{SCB, SYST};
use embassy_stm32::pac;
use embassy_stm32::pac::pwr::vals::Pdds;
use minicon_hal::{ClockError, PowerControl};

/// Polls of an oscillator ready flag before giving up on it
const CLOCK_READY_SPIN_LIMIT: u32 = 100_000;

/// Clock sources in use when the snapshot was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockSnapshot {
    hse_on: bool,
    pll_on: bool,
    /// Raw SW field of RCC_CFGR
    sysclk_source: u8,
}

impl ClockSnapshot {
    /// Record the current clock tree
    pub fn capture() -> Self {
        let cr = pac::RCC.cr().read();
        Self {
            hse_on: cr.hseon(),
            pll_on: cr.pllon(),
            sysclk_source: pac::RCC.cfgr().read().sw().to_bits(),
        }
    }

    /// Turn the recorded oscillators back on and switch SYSCLK back
    ///
    /// Stops at the first oscillator or switch that does not settle in
    /// time; the core then keeps running from HSI.
    pub fn restore(&self) -> Result<(), ClockError> {
        if self.hse_on {
            pac::RCC.cr().modify(|w| w.set_hseon(true));
            if !spin_until(|| pac::RCC.cr().read().hserdy()) {
                return Err(ClockError::HseNotReady);
            }
        }
        if self.pll_on {
            pac::RCC.cr().modify(|w| w.set_pllon(true));
            if !spin_until(|| pac::RCC.cr().read().pllrdy()) {
                return Err(ClockError::PllNotLocked);
            }
        }

        let sw = pac::rcc::vals::Sw::from_bits(self.sysclk_source);
        pac::RCC.cfgr().modify(|w| w.set_sw(sw));
        if spin_until(|| pac::RCC.cfgr().read().sws().to_bits() == self.sysclk_source) {
            Ok(())
        } else {
            Err(ClockError::SwitchFailed)
        }
    }
}

fn spin_until(mut ready: impl FnMut() -> bool) -> bool {
    (0..CLOCK_READY_SPIN_LIMIT).any(|_| ready())
}

/// Sleep and clock control for the Cortex-M4 core
pub struct CorePower {
    syst: SYST,
    scb: SCB,
    clocks: ClockSnapshot,
    tick_suspended: bool,
}

impl CorePower {
    /// Take the core peripherals and record the running clock tree
    ///
    /// Call after clock bring-up so the snapshot is the tree to restore.
    pub fn new(syst: SYST, scb: SCB) -> Self {
        Self {
            syst,
            scb,
            clocks: ClockSnapshot::capture(),
            tick_suspended: false,
        }
    }
}

impl PowerControl for CorePower {
    fn suspend_tick(&mut self) {
        if self.syst.is_interrupt_enabled() {
            self.syst.disable_interrupt();
            self.tick_suspended = true;
        }
    }

    fn resume_tick(&mut self) {
        if self.tick_suspended {
            self.syst.enable_interrupt();
            self.tick_suspended = false;
        }
    }

    fn wait_for_interrupt(&mut self) {
        self.scb.clear_sleepdeep();
        cortex_m::asm::wfi();
    }

    fn enter_stop(&mut self) {
        pac::PWR.cr().modify(|w| {
            w.set_pdds(Pdds::STOP_MODE);
            w.set_lpds(true);
        });
        self.scb.set_sleepdeep();
        cortex_m::asm::dsb();
        cortex_m::asm::wfi();
        self.scb.clear_sleepdeep();
    }

    fn restore_clocks(&mut self) -> Result<(), ClockError> {
        self.clocks.restore()
    }
}
