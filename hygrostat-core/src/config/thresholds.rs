//! Threshold set and validation
//!
//! Bounds are limited to what the DHT11 can physically sense:
//! 0-50 °C (32-122 °F) and 20-95 %RH.

use super::units::{to_celsius, to_fahrenheit, Unit};

/// Lowest supported temperature (°C)
pub const TEMP_MIN_C: i32 = 0;
/// Highest supported temperature (°C)
pub const TEMP_MAX_C: i32 = 50;
/// Lowest supported temperature (°F)
pub const TEMP_MIN_F: f32 = 32.0;
/// Highest supported temperature (°F)
pub const TEMP_MAX_F: f32 = 122.0;
/// Lowest supported relative humidity (%)
pub const HUMIDITY_MIN: u32 = 20;
/// Highest supported relative humidity (%)
pub const HUMIDITY_MAX: u32 = 95;

/// Which validation clause rejected a candidate set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThresholdError {
    /// Celsius pair out of order or outside 0-50
    CelsiusRange,
    /// Fahrenheit pair out of order or outside 32-122
    FahrenheitRange,
    /// Humidity pair out of order or outside 20-95
    HumidityRange,
}

/// The operator's acceptable climate window
///
/// Temperature bounds are kept in both units, converted once at entry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ThresholdSet {
    pub temp_min_c: i32,
    pub temp_max_c: i32,
    pub temp_min_f: f32,
    pub temp_max_f: f32,
    pub humidity_min: u32,
    pub humidity_max: u32,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self::FULL_RANGE
    }
}

impl ThresholdSet {
    /// Full sensor range, the power-on default
    pub const FULL_RANGE: ThresholdSet = ThresholdSet {
        temp_min_c: TEMP_MIN_C,
        temp_max_c: TEMP_MAX_C,
        temp_min_f: TEMP_MIN_F,
        temp_max_f: TEMP_MAX_F,
        humidity_min: HUMIDITY_MIN,
        humidity_max: HUMIDITY_MAX,
    };

    /// Build a set from Celsius temperature bounds
    pub fn from_celsius(temp_min: i32, temp_max: i32, humidity_min: u32, humidity_max: u32) -> Self {
        let mut set = Self::FULL_RANGE;
        set.set_temp_min(temp_min, Unit::Celsius);
        set.set_temp_max(temp_max, Unit::Celsius);
        set.humidity_min = humidity_min;
        set.humidity_max = humidity_max;
        set
    }

    /// Store the lower temperature bound entered in `unit`
    pub fn set_temp_min(&mut self, value: i32, unit: Unit) {
        let (c, f) = dual(value, unit);
        self.temp_min_c = c;
        self.temp_min_f = f;
    }

    /// Store the upper temperature bound entered in `unit`
    pub fn set_temp_max(&mut self, value: i32, unit: Unit) {
        let (c, f) = dual(value, unit);
        self.temp_max_c = c;
        self.temp_max_f = f;
    }

    /// Check all three clauses
    ///
    /// Returns the first failing clause. There is no partial acceptance:
    /// one failing clause rejects the whole set.
    pub fn check(&self) -> Result<(), ThresholdError> {
        if !(TEMP_MIN_C <= self.temp_min_c
            && self.temp_min_c <= self.temp_max_c
            && self.temp_max_c <= TEMP_MAX_C)
        {
            return Err(ThresholdError::CelsiusRange);
        }

        if !(TEMP_MIN_F <= self.temp_min_f
            && self.temp_min_f <= self.temp_max_f
            && self.temp_max_f <= TEMP_MAX_F)
        {
            return Err(ThresholdError::FahrenheitRange);
        }

        if !(HUMIDITY_MIN <= self.humidity_min
            && self.humidity_min <= self.humidity_max
            && self.humidity_max <= HUMIDITY_MAX)
        {
            return Err(ThresholdError::HumidityRange);
        }

        Ok(())
    }

    /// Check if the set may be committed
    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }
}

/// Validate a candidate threshold set
pub fn validate(set: &ThresholdSet) -> bool {
    set.is_valid()
}

/// Derive the (Celsius, Fahrenheit) pair for a value entered in `unit`
fn dual(value: i32, unit: Unit) -> (i32, f32) {
    match unit {
        Unit::Celsius => (value, to_fahrenheit(value)),
        Unit::Fahrenheit => {
            let f = value as f32;
            (to_celsius(f), f)
        }
    }
}
