//! Configuration stages

/// Number of configuration stages
pub const STAGE_COUNT: usize = 4;

/// One configuration stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    TemperatureMin,
    TemperatureMax,
    HumidityMin,
    HumidityMax,
}

impl Stage {
    /// All stages in entry order
    pub const ALL: [Stage; STAGE_COUNT] = [
        Stage::TemperatureMin,
        Stage::TemperatureMax,
        Stage::HumidityMin,
        Stage::HumidityMax,
    ];

    /// Stage at position `index` in the sequence
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Position in the sequence
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Following stage, `None` after the last
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Prompt shown while the stage is being entered
    pub fn prompt(&self) -> &'static str {
        match self {
            Stage::TemperatureMin => "Min Temperature?",
            Stage::TemperatureMax => "Max Temperature?",
            Stage::HumidityMin => "Min Humidity?",
            Stage::HumidityMax => "Max Humidity?",
        }
    }
}
