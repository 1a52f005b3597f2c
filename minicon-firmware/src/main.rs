//! Minicon firmware for STM32F303K8
//!
//! Single-threaded and blocking: interrupt handlers post events, the
//! dispatcher hands them to the active program and sleeps whenever the
//! queue runs dry.

#![no_std]
#![no_main]

mod apps;
mod board;
mod config;
mod fatal;
mod idle;
mod isr;

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::entry;
use defmt::*;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use embassy_stm32::rcc::LsConfig;
use embassy_stm32::spi::Spi;
use minicon_core::{Dispatcher, PowerScheduler};
use minicon_display::Pcd8544;
use minicon_hal::spi::SpiConfig;
use minicon_hal_stm32f3::exti::{self, Edge};
use minicon_hal_stm32f3::spi::bus_config;
use minicon_hal_stm32f3::{BlockingSpi, CorePower, CycleDelay, HalOutput, RtcWakeTimer};
use {defmt_rtt as _, panic_probe as _};

use apps::keys::KeyEcho;
use apps::launcher::{ContrastWindow, Launcher, MenuWindow, Settings};
use board::{Lcd, Scheduler};
use config::CONSOLE_CONFIG;
use idle::Idle;

#[entry]
fn main() -> ! {
    info!("Minicon firmware starting...");

    // RTC wakeup runs from LSI so it keeps counting in stop mode
    let mut hw = embassy_stm32::Config::default();
    hw.rcc.ls = LsConfig::default_lsi();
    let p = embassy_stm32::init(hw);
    let mut core = unwrap!(cortex_m::Peripherals::take());
    info!("Peripherals initialized");

    core.SYST.set_clock_source(SystClkSource::Core);
    core.SYST.set_reload(board::SYSCLK_HZ / board::TICK_HZ - 1);
    core.SYST.clear_current();
    core.SYST.enable_counter();
    core.SYST.enable_interrupt();

    // LCD on SPI1
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PB3, p.PB5, bus_config(&SpiConfig::default()));
    let dc = HalOutput::new(Output::new(p.PB7, Level::Low, Speed::High), false);
    let cs = HalOutput::new(Output::new(p.PB6, Level::High, Speed::High), true);
    let rst = HalOutput::new(Output::new(p.PA15, Level::High, Speed::Low), true);
    let mut lcd: Lcd = Pcd8544::new(BlockingSpi::new(spi), dc, cs, rst);

    let display = &CONSOLE_CONFIG.display;
    let mut delay = CycleDelay::new(board::SYSCLK_HZ);
    match lcd.initialize(&mut delay, display.contrast, display.bias) {
        Ok(()) => info!("LCD initialized"),
        Err(e) => error!("Failed to initialize LCD: {:?}", e),
    }
    if let Err(e) = lcd.set_temperature_coefficient(display.temperature_coefficient) {
        warn!("Failed to set temperature coefficient: {:?}", e);
    }
    lcd.set_rotation(display.rotation);

    // Buttons pull low when pressed
    let _buttons = [
        Input::new(p.PA3, Pull::Up),
        Input::new(p.PA4, Pull::Up),
        Input::new(p.PA5, Pull::Up),
        Input::new(p.PA6, Pull::Up),
        Input::new(p.PA7, Pull::Up),
    ];
    for pin in board::BUTTON_PINS {
        exti::route_pin(pin, Edge::Falling);
    }
    exti::enable_rtc_wakeup_line();
    isr::enable();
    info!("Buttons ready");

    let power = &CONSOLE_CONFIG.power;
    let scheduler: Scheduler = PowerScheduler::new(
        RtcWakeTimer::new(),
        CorePower::new(core.SYST, core.SCB),
        power.sleep_depth,
    );

    let mut menu = MenuWindow;
    let mut contrast = ContrastWindow;
    let mut launcher: Launcher<'_> = Launcher::new(Settings::new(display.contrast));
    defmt::assert_eq!(unwrap!(launcher.add_window(&mut menu)), apps::launcher::MENU);
    defmt::assert_eq!(unwrap!(launcher.add_window(&mut contrast)), apps::launcher::CONTRAST);

    let mut keys = KeyEcho::new();

    let mut dispatcher = Dispatcher::new(lcd, &isr::EVENTS, Idle::new(scheduler));
    dispatcher.set_refresh(power.refresh_ms);
    defmt::assert_eq!(unwrap!(dispatcher.register(&mut launcher)), apps::LAUNCHER);
    defmt::assert_eq!(unwrap!(dispatcher.register(&mut keys)), apps::KEY_ECHO);
    dispatcher.set_main_program(apps::LAUNCHER);

    info!(
        "Console running: refresh {} ms, {:?} sleep",
        power.refresh_ms, power.sleep_depth
    );
    dispatcher.run(fatal::fatal)
}
