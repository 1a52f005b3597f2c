//! Board wiring for the STM32F303K8 console
//!
//! | Signal        | Pin  |
//! |---------------|------|
//! | LCD SCK       | PB3  |
//! | LCD DIN       | PB5  |
//! | LCD D/C       | PB7  |
//! | LCD CE        | PB6  |
//! | LCD RST       | PA15 |
//! | Buttons       | PA3-PA7, active low |

use embassy_stm32::gpio::Output;
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::Spi;
use minicon_core::PowerScheduler;
use minicon_display::Pcd8544;
use minicon_hal::PinId;
use minicon_hal_stm32f3::{BlockingSpi, CorePower, HalOutput, RtcWakeTimer};

/// Core clock after reset (HSI, no PLL)
pub const SYSCLK_HZ: u32 = 8_000_000;

/// System tick rate
pub const TICK_HZ: u32 = 1000;

/// Button inputs, in EXTI line order
pub const BUTTON_PINS: [PinId; 5] = [
    PinId::new('A', 3),
    PinId::new('A', 4),
    PinId::new('A', 5),
    PinId::new('A', 6),
    PinId::new('A', 7),
];

pub type DisplaySpi = BlockingSpi<Spi<'static, Blocking>>;
pub type ControlPin = HalOutput<Output<'static>>;
pub type Lcd = Pcd8544<DisplaySpi, ControlPin, ControlPin, ControlPin>;
pub type Scheduler = PowerScheduler<RtcWakeTimer, CorePower>;
