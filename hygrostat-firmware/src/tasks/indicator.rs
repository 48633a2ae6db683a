//! Buzzer and LED task
//!
//! In Alert the outputs follow the alert cadence. Otherwise the LED
//! acknowledges key presses.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Output;
use embassy_time::Timer;

use hygrostat_core::config::MonitorConfig;
use hygrostat_core::monitor::AlertCadence;
use hygrostat_core::state::Mode;
use hygrostat_core::traits::Indicator;
use hygrostat_drivers::indicator::GpioIndicator;

use crate::channels::{FLASH_CHANNEL, SHARED};

/// Mode re-check period while quiet (ms)
const MODE_POLL_MS: u64 = 100;

/// The board's LED and buzzer
pub type AlertOutputs = GpioIndicator<Output<'static>, Output<'static>>;

/// Indicator task - alert cadence and key acknowledgement
#[embassy_executor::task]
pub async fn indicator_task(mut outputs: AlertOutputs, config: MonitorConfig) {
    info!("Indicator task started");

    let mut cadence = AlertCadence::from_config(&config);

    loop {
        if SHARED.mode() == Mode::Alert {
            let phase_ms = cadence.drive(&mut outputs);
            Timer::after_millis(phase_ms as u64).await;

            // Key flashes are not shown while alerting
            while FLASH_CHANNEL.try_receive().is_ok() {}
            continue;
        }

        if cadence.is_running() {
            cadence.silence(&mut outputs);
            info!("Alert silenced");
        }

        match select(FLASH_CHANNEL.receive(), Timer::after_millis(MODE_POLL_MS)).await {
            Either::First(flash_ms) => {
                outputs.set_led(true);
                Timer::after_millis(flash_ms as u64).await;
                outputs.set_led(false);
            }
            Either::Second(()) => {}
        }
    }
}
