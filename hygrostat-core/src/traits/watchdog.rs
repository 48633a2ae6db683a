//! Watchdog trait

/// Trait for a liveness timer that resets the device when starved
pub trait Watchdog {
    /// Arm the timer
    fn start(&mut self, timeout_ms: u32);

    /// Restart the countdown
    fn feed(&mut self);
}
