//! Alert cadence
//!
//! While alerting, buzzer and LED are driven on for `on_ms`, then off
//! for `off_ms`. The caller waits out each phase and re-checks the mode
//! before asking for the next one.

use crate::config::MonitorConfig;
use crate::traits::Indicator;

/// Output level for one alert phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AlertPhase {
    On,
    Off,
}

impl AlertPhase {
    /// Check if outputs are driven in this phase
    pub fn is_on(&self) -> bool {
        matches!(self, AlertPhase::On)
    }
}

/// On/off alternation for the indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertCadence {
    on_ms: u32,
    off_ms: u32,
    /// Phase most recently started, `None` when silent
    phase: Option<AlertPhase>,
}

impl AlertCadence {
    /// Create a silent cadence
    pub const fn new(on_ms: u32, off_ms: u32) -> Self {
        Self {
            on_ms,
            off_ms,
            phase: None,
        }
    }

    /// Create a cadence from the monitor timing
    pub fn from_config(config: &MonitorConfig) -> Self {
        Self::new(config.alert_on_ms, config.alert_off_ms)
    }

    /// Length of one on/off cycle (ms)
    pub fn period_ms(&self) -> u32 {
        self.on_ms.saturating_add(self.off_ms)
    }

    /// Check if a cycle is in progress
    pub fn is_running(&self) -> bool {
        self.phase.is_some()
    }

    /// Move to the next phase
    ///
    /// Returns the phase and how long it lasts. A silent cadence starts
    /// with the on phase.
    pub fn advance(&mut self) -> (AlertPhase, u32) {
        let next = match self.phase {
            Some(AlertPhase::On) => AlertPhase::Off,
            Some(AlertPhase::Off) | None => AlertPhase::On,
        };
        self.phase = Some(next);

        let duration = match next {
            AlertPhase::On => self.on_ms,
            AlertPhase::Off => self.off_ms,
        };
        (next, duration)
    }

    /// Advance and apply the phase to `indicator`
    ///
    /// Returns how long to wait before the next call.
    pub fn drive<I: Indicator + ?Sized>(&mut self, indicator: &mut I) -> u32 {
        let (phase, duration) = self.advance();
        indicator.set(phase.is_on());
        duration
    }

    /// Stop the cycle and switch the outputs off
    pub fn silence<I: Indicator + ?Sized>(&mut self, indicator: &mut I) {
        self.phase = None;
        indicator.set(false);
    }
}
