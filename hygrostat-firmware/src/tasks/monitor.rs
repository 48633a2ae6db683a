//! Climate monitor task
//!
//! Samples the DHT11 on every cycle. While monitoring, each sample is
//! evaluated against the committed thresholds and a breach moves the
//! device into Alert.

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::OutputOpenDrain;
use embassy_time::{Delay, Duration, Instant, Timer};

use hygrostat_core::config::MonitorConfig;
use hygrostat_core::monitor::{Monitor, MonitorStep, ReadPacer};
use hygrostat_core::traits::ClimateSensor;
use hygrostat_drivers::sensor::{Dht11, MIN_READ_INTERVAL_MS};

use crate::channels::{DISPLAY_WAKE, MONITOR_WAKE, SHARED};
use crate::screen::update_screen;

/// The board's climate sensor
pub type ClimateProbe = Dht11<OutputOpenDrain<'static>, Delay, fn() -> u64>;

/// Microsecond clock for DHT11 pulse timing
pub fn now_us() -> u64 {
    Instant::now().as_micros()
}

/// Monitor task - sampling, evaluation, breach display
#[embassy_executor::task]
pub async fn monitor_task(mut sensor: ClimateProbe, config: MonitorConfig) {
    info!("Monitor task started");

    let mut monitor = Monitor::new();
    let mut pacer = ReadPacer::new(MIN_READ_INTERVAL_MS);
    let mut last = MonitorStep::Background;

    loop {
        let wait_ms = pacer.wait_ms(Instant::now().as_millis());
        if wait_ms > 0 {
            Timer::after_millis(wait_ms).await;
        }
        pacer.mark(Instant::now().as_millis());

        // The bit-banged read runs outside the screen lock
        let reading = sensor.read();
        let step = update_screen(|screen| monitor.process(&SHARED, reading, screen));

        if step != last {
            match step {
                MonitorStep::SensorFault(e) => warn!("Sensor read failed: {}", e),
                MonitorStep::Alerting(cause) => {
                    warn!("ALERT: {}", cause.as_str());
                    DISPLAY_WAKE.signal(());
                }
                MonitorStep::Recovered => {
                    info!("Climate back in range");
                    DISPLAY_WAKE.signal(());
                }
                MonitorStep::InRange | MonitorStep::Background => {}
            }
            last = step;
        }

        if let Some(sample) = SHARED.sample() {
            trace!("Sample: {} C, {}%", sample.celsius, sample.humidity);
        }

        let interval = if SHARED.mode().evaluates_thresholds() {
            config.sample_interval_ms
        } else {
            config.idle_sample_interval_ms
        };
        select(
            Timer::after(Duration::from_millis(interval as u64)),
            MONITOR_WAKE.wait(),
        )
        .await;
    }
}
