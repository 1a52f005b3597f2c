//! SPI adapter for STM32F3
//!
//! The display bus runs in blocking transmit-only mode. Each write waits
//! for the shift register to drain, so the bus is never busy between
//! calls and the driver may toggle D/C straight after a write returns.

use embassy_stm32::spi;
use embassy_stm32::time::Hertz;
use embedded_hal::spi::SpiBus as EhSpiBus;
use minicon_hal::spi::{Mode, SpiConfig};
use minicon_hal::SpiBus;

/// Build the `embassy-stm32` configuration for a display bus
pub fn bus_config(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = Hertz(config.frequency);
    out.mode = match config.mode {
        Mode::Mode0 => spi::MODE_0,
        Mode::Mode1 => spi::MODE_1,
        Mode::Mode2 => spi::MODE_2,
        Mode::Mode3 => spi::MODE_3,
    };
    out
}

/// Blocking `embedded-hal` SPI bus as a display bus
pub struct BlockingSpi<B> {
    bus: B,
}

impl<B: EhSpiBus<u8>> BlockingSpi<B> {
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: EhSpiBus<u8>> SpiBus for BlockingSpi<B> {
    type Error = B::Error;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)?;
        self.bus.flush()
    }

    fn is_busy(&self) -> bool {
        false
    }
}
