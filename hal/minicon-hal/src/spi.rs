//! SPI bus abstractions
//!
//! The PCD8544 is write-only, so the bus trait only transmits. A transfer
//! may complete asynchronously (DMA); `is_busy` reports whether the last
//! transfer is still in flight so the driver can hold the data/command
//! line steady until it finishes.

/// Transmit-only SPI bus master
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Start transmitting `data`
    ///
    /// May return before the last byte has left the shift register.
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Check whether a previously started transfer is still in progress
    fn is_busy(&self) -> bool;
}

/// SPI configuration
#[derive(Debug, Clone, Copy)]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity and phase
    pub mode: Mode,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 4_000_000, // PCD8544 maximum serial clock
            mode: Mode::Mode0,
        }
    }
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}
