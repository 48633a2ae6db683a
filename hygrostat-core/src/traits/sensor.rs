//! Climate sensor trait

use crate::config::units::{to_fahrenheit, Unit};

/// Errors that can occur with climate sensing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer, or stopped toggling the line mid-frame
    Timeout,
    /// Frame checksum mismatch
    Checksum,
    /// Underlying pin or bus error
    Bus,
}

/// One climate reading
///
/// Temperature is whole degrees Celsius as reported by the sensor; the
/// Fahrenheit value is derived once, when the sample is taken.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    pub celsius: i16,
    pub fahrenheit: f32,
    /// Relative humidity (%)
    pub humidity: u8,
}

impl Sample {
    /// Build a sample from a Celsius reading
    pub fn new(celsius: i16, humidity: u8) -> Self {
        Self {
            celsius,
            fahrenheit: to_fahrenheit(celsius as i32),
            humidity,
        }
    }

    /// Temperature in `unit`
    pub fn temperature(&self, unit: Unit) -> f32 {
        match unit {
            Unit::Celsius => self.celsius as f32,
            Unit::Fahrenheit => self.fahrenheit,
        }
    }
}

/// Trait for combined temperature/humidity sensors
///
/// Takes `&mut self` because a read drives the sensor's data line.
pub trait ClimateSensor {
    /// Take a fresh reading
    fn read(&mut self) -> Result<Sample, SensorError>;
}
