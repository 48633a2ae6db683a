//! RP2040 hardware watchdog

use embassy_rp::watchdog::Watchdog as RpWatchdog;
use embassy_time::Duration;

use hygrostat_core::traits::Watchdog;

/// Hardware watchdog behind the core [`Watchdog`] trait
pub struct HwWatchdog(RpWatchdog);

impl HwWatchdog {
    /// Wrap the peripheral; the counter pauses while a debugger halts the core
    pub fn new(mut watchdog: RpWatchdog) -> Self {
        watchdog.pause_on_debug(true);
        Self(watchdog)
    }
}

impl Watchdog for HwWatchdog {
    fn start(&mut self, timeout_ms: u32) {
        self.0.start(Duration::from_millis(timeout_ms as u64));
    }

    fn feed(&mut self) {
        self.0.feed();
    }
}
