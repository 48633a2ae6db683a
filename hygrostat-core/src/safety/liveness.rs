//! Software liveness timer
//!
//! Models the hardware watchdog: time accumulates through [`tick`] and
//! the timer expires once it reaches the timeout without a feed. Used
//! on the host, where there is no hardware counter to starve.
//!
//! [`tick`]: LivenessTimer::tick

use crate::traits::Watchdog;

/// Software watchdog
#[derive(Debug, Clone, Default)]
pub struct LivenessTimer {
    /// Timeout once started
    timeout_ms: Option<u32>,
    /// Time since last feed (ms)
    since_feed_ms: u32,
    /// Latched once the timeout elapses
    expired: bool,
    /// Number of feeds since start
    feeds: u32,
}

impl LivenessTimer {
    /// Create a stopped timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance time
    ///
    /// Returns `true` if the timer is expired after this step.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if let Some(timeout) = self.timeout_ms {
            self.since_feed_ms = self.since_feed_ms.saturating_add(delta_ms);
            if self.since_feed_ms >= timeout {
                self.expired = true;
            }
        }
        self.expired
    }

    /// Check if a reset would have been forced
    pub fn expired(&self) -> bool {
        self.expired
    }

    /// Check if the timer has been started
    pub fn is_running(&self) -> bool {
        self.timeout_ms.is_some()
    }

    /// Time since the last feed (ms)
    pub fn since_feed_ms(&self) -> u32 {
        self.since_feed_ms
    }

    /// Feeds since start
    pub fn feeds(&self) -> u32 {
        self.feeds
    }
}

impl Watchdog for LivenessTimer {
    fn start(&mut self, timeout_ms: u32) {
        self.timeout_ms = Some(timeout_ms);
        self.since_feed_ms = 0;
        self.expired = false;
        self.feeds = 0;
    }

    fn feed(&mut self) {
        // Too late once expired: the device has already reset
        if !self.expired {
            self.since_feed_ms = 0;
            self.feeds = self.feeds.saturating_add(1);
        }
    }
}
