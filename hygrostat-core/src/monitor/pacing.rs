//! Sensor read pacing
//!
//! Single-wire climate sensors stop answering when polled again too
//! soon. Early wake-ups must not shorten the gap between reads.

/// Minimum spacing between sensor reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPacer {
    min_gap_ms: u64,
    /// Time of the last read, `None` before the first
    last_read_ms: Option<u64>,
}

impl ReadPacer {
    /// Create a pacer; the first read is allowed at once
    pub const fn new(min_gap_ms: u32) -> Self {
        Self {
            min_gap_ms: min_gap_ms as u64,
            last_read_ms: None,
        }
    }

    /// How long to wait at `now_ms` before reading (ms)
    pub fn wait_ms(&self, now_ms: u64) -> u64 {
        match self.last_read_ms {
            Some(last) => last.saturating_add(self.min_gap_ms).saturating_sub(now_ms),
            None => 0,
        }
    }

    /// Record a read started at `now_ms`
    pub fn mark(&mut self, now_ms: u64) {
        self.last_read_ms = Some(now_ms);
    }
}
