//! Keypad scan task
//!
//! Energizes one row per period, dispatches queued keys and is the only
//! place the watchdog is fed. If this loop stalls the board resets.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Timer};

use hygrostat_core::capture::{KeyOutcome, ScanLoop};
use hygrostat_core::config::KeypadConfig;
use hygrostat_core::safety::Supervisor;
use hygrostat_drivers::keypad::GpioRows;

use crate::channels::{notify_mode_change, KEY_CHANNEL, SHARED};
use crate::watchdog::HwWatchdog;

/// Scan task - row scheduling, key dispatch, watchdog feed
#[embassy_executor::task]
pub async fn scan_task(
    rows: GpioRows<Output<'static>>,
    watchdog: HwWatchdog,
    config: KeypadConfig,
    timeout_ms: u32,
) {
    info!("Scan task started");

    let mut scan = ScanLoop::new(rows, Supervisor::new(watchdog, timeout_ms));
    scan.supervisor_mut().arm();
    info!("Watchdog armed: {} ms", timeout_ms);

    let period = Duration::from_millis(config.scan_period_ms as u64);

    loop {
        let pending = KEY_CHANNEL.try_receive().ok();
        if let Some(outcome) = scan.iterate(&SHARED, pending) {
            report(outcome);
        }

        Timer::after(period).await;
    }
}

fn report(outcome: KeyOutcome) {
    match outcome {
        KeyOutcome::ModeChanged(transition) => {
            info!("Mode: {} -> {}", transition.from, transition.to);
            notify_mode_change();
        }
        KeyOutcome::UnitToggled(unit) => {
            info!("Display unit: {}", unit);
            notify_mode_change();
        }
        KeyOutcome::Dropped(digit) => debug!("Digit {} dropped", digit),
        other => debug!("Key: {}", other),
    }
}
