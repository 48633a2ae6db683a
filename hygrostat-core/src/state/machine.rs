//! State machine definition
//!
//! Sampling cadence, keypad behavior and alert output are all a function
//! of the current mode and an event.

use super::events::Event;

/// Device operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Mode {
    /// Live climate shown, no threshold evaluation
    #[default]
    Idle = 0,
    /// Operator is entering a new threshold set
    Configure = 1,
    /// Samples evaluated against the committed thresholds
    Monitor = 2,
    /// A bound is breached; buzzer and LED cycling
    Alert = 3,
}

impl Mode {
    /// All modes, in discriminant order
    pub const ALL: [Mode; 4] = [Mode::Idle, Mode::Configure, Mode::Monitor, Mode::Alert];

    /// Decode a mode stored in an atomic register
    ///
    /// Unknown values decode to `Idle`, the safe default.
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Mode::Configure,
            2 => Mode::Monitor,
            3 => Mode::Alert,
            _ => Mode::Idle,
        }
    }

    /// Encode for an atomic register
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Check if samples should be evaluated against thresholds
    pub fn evaluates_thresholds(&self) -> bool {
        matches!(self, Mode::Monitor | Mode::Alert)
    }

    /// Check if the keypad digits feed the input buffer
    pub fn accepts_digits(&self) -> bool {
        matches!(self, Mode::Configure)
    }

    /// Check if the live climate readout owns the display
    pub fn shows_live_climate(&self) -> bool {
        matches!(self, Mode::Idle | Mode::Monitor)
    }

    /// Process an event and return the next mode
    ///
    /// This is the core transition logic. Events that are not defined
    /// for the current mode leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Mode::*;

        match (self, event) {
            // Operator commands
            (Idle | Monitor | Alert, EnterConfigure) => Configure,
            (_, Cancel) => Idle,

            // Sequencer
            (Configure, ThresholdsCommitted) => Monitor,

            // Monitor evaluation
            (Monitor, Breach(_)) => Alert,
            (Alert, BreachCleared) => Monitor,

            // Default: stay in current mode
            _ => self,
        }
    }
}
