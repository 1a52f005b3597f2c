//! Busy-wait delay
//!
//! Cycle-counted spin for the display reset pulse during bring-up.

use embedded_hal::delay::DelayNs;

/// Delay by burning core cycles
pub struct CycleDelay {
    sysclk_hz: u32,
}

impl CycleDelay {
    /// Create a delay for a core running at `sysclk_hz`
    pub const fn new(sysclk_hz: u32) -> Self {
        Self { sysclk_hz }
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns as u64 * self.sysclk_hz as u64).div_ceil(1_000_000_000);
        cortex_m::asm::delay(cycles.min(u32::MAX as u64) as u32);
    }

    fn delay_us(&mut self, us: u32) {
        let cycles = (us as u64 * self.sysclk_hz as u64).div_ceil(1_000_000);
        cortex_m::asm::delay(cycles.min(u32::MAX as u64) as u32);
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}
