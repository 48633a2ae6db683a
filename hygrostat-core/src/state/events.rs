//! Events that trigger mode transitions

/// Why a sample left the configured window
///
/// Variants are listed in evaluation order: when several bounds are
/// breached at once, the first one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BreachCause {
    TemperatureTooLow,
    TemperatureTooHigh,
    HumidityTooLow,
    HumidityTooHigh,
}

impl BreachCause {
    /// Short label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            BreachCause::TemperatureTooLow => "temperature too low",
            BreachCause::TemperatureTooHigh => "temperature too high",
            BreachCause::HumidityTooLow => "humidity too low",
            BreachCause::HumidityTooHigh => "humidity too high",
        }
    }
}

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Operator commands (keypad column 3)
    /// Key D: start threshold entry
    EnterConfigure,
    /// Key B: return to idle
    Cancel,

    // Sequencer events
    /// All four stages entered and the set passed validation
    ThresholdsCommitted,

    // Monitor events
    /// A fresh sample violates the active thresholds
    Breach(BreachCause),
    /// A fresh sample is back inside the active thresholds
    BreachCleared,
}
