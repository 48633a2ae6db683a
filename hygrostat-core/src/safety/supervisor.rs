//! Watchdog supervisor

use crate::traits::Watchdog;

/// Owns the watchdog and the single place that feeds it
pub struct Supervisor<W: Watchdog> {
    watchdog: W,
    timeout_ms: u32,
    armed: bool,
}

impl<W: Watchdog> Supervisor<W> {
    /// Wrap a watchdog; nothing is armed yet
    pub fn new(watchdog: W, timeout_ms: u32) -> Self {
        Self {
            watchdog,
            timeout_ms,
            armed: false,
        }
    }

    /// Start the watchdog with the configured timeout
    ///
    /// Arming twice is a no-op.
    pub fn arm(&mut self) {
        if !self.armed {
            self.watchdog.start(self.timeout_ms);
            self.armed = true;
        }
    }

    /// Feed the watchdog (no-op before arming)
    pub fn feed(&mut self) {
        if self.armed {
            self.watchdog.feed();
        }
    }

    /// Check if the watchdog has been started
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Configured timeout (ms)
    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// The wrapped watchdog
    pub fn watchdog(&self) -> &W {
        &self.watchdog
    }

    /// The wrapped watchdog, mutably
    pub fn watchdog_mut(&mut self) -> &mut W {
        &mut self.watchdog
    }
}
