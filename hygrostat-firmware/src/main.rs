//! Hygrostat - Climate Guard Firmware
//!
//! Main firmware binary for RP2040-based boards. A DHT11 is sampled
//! continuously; the operator enters a temperature/humidity window on a
//! 4x4 keypad, and a breach sounds the buzzer and LED until the climate
//! recovers or the operator cancels.
//!
//! # Pinout
//!
//! | Function | Pin |
//! |----------|-----|
//! | LCD SDA / SCL (I2C0) | GP4 / GP5 |
//! | Keypad columns 0-3 | GP6-GP9 |
//! | Keypad rows 0-3 | GP10-GP13 |
//! | DHT11 data | GP15 |
//! | Buzzer | GP16 |
//! | LED | GP17 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, OutputOpenDrain, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::watchdog::{ResetReason, Watchdog};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use hygrostat_core::config::{parse_device_config, DeviceConfig};
use hygrostat_drivers::display::Jhd1802;
use hygrostat_drivers::indicator::GpioIndicator;
use hygrostat_drivers::keypad::GpioRows;
use hygrostat_drivers::sensor::Dht11;

mod channels;
mod screen;
mod tasks;
mod watchdog;

use crate::watchdog::HwWatchdog;

/// Embedded configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// I2C bus speed for the LCD
const LCD_I2C_FREQUENCY: u32 = 100_000;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Hygrostat firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();

    let watchdog = Watchdog::new(p.WATCHDOG);
    match watchdog.reset_reason() {
        Some(ResetReason::TimedOut) => warn!("Recovered from a watchdog reset"),
        Some(ResetReason::Forced) => info!("Forced reset"),
        None => info!("Power-on reset"),
    }

    // LCD on I2C0
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = LCD_I2C_FREQUENCY;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let mut lcd = Jhd1802::new(i2c, Delay);
    if let Err(e) = lcd.init() {
        warn!("LCD init failed: {}", e);
    }

    // Keypad rows idle low, columns pulled down
    let rows = GpioRows::new([
        Output::new(p.PIN_10, Level::Low),
        Output::new(p.PIN_11, Level::Low),
        Output::new(p.PIN_12, Level::Low),
        Output::new(p.PIN_13, Level::Low),
    ]);
    let columns = [
        Input::new(p.PIN_6, Pull::Down),
        Input::new(p.PIN_7, Pull::Down),
        Input::new(p.PIN_8, Pull::Down),
        Input::new(p.PIN_9, Pull::Down),
    ];

    // DHT11 data line idles high through the pull-up
    let dht = Dht11::new(
        OutputOpenDrain::new(p.PIN_15, Level::High),
        Delay,
        tasks::monitor::now_us as fn() -> u64,
    );

    let outputs = GpioIndicator::new_active_high(
        Output::new(p.PIN_17, Level::Low),
        Output::new(p.PIN_16, Level::Low),
    );

    // Spawn tasks
    spawner.spawn(tasks::lcd_task(lcd)).unwrap();
    spawner.spawn(tasks::display_task(config.display)).unwrap();
    spawner
        .spawn(tasks::monitor_task(dht, config.monitor))
        .unwrap();
    spawner
        .spawn(tasks::indicator_task(outputs, config.monitor))
        .unwrap();
    for (col, pin) in columns.into_iter().enumerate() {
        spawner
            .spawn(tasks::column_task(pin, col as u8, config.keypad))
            .unwrap();
    }
    spawner
        .spawn(tasks::scan_task(
            rows,
            HwWatchdog::new(watchdog),
            config.keypad,
            config.watchdog.timeout_ms,
        ))
        .unwrap();

    info!("All tasks spawned");
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> DeviceConfig {
    match parse_device_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Configuration loaded: {}", config);
            config
        }
        Err(e) => {
            warn!("Invalid device.toml ({}), using defaults", e);
            DeviceConfig::default()
        }
    }
}
