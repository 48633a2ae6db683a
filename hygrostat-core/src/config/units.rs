//! Temperature units and conversion
//!
//! Conversions are applied once, when a threshold is entered. Both
//! representations are stored so a unit toggle never touches thresholds.

/// Temperature unit used for display and threshold comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Unit {
    #[default]
    Celsius = 0,
    Fahrenheit = 1,
}

impl Unit {
    /// Decode a unit stored in an atomic register
    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => Unit::Fahrenheit,
            _ => Unit::Celsius,
        }
    }

    /// Encode for an atomic register
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// The other unit
    pub fn toggled(self) -> Self {
        match self {
            Unit::Celsius => Unit::Fahrenheit,
            Unit::Fahrenheit => Unit::Celsius,
        }
    }

    /// Single-letter suffix for the display
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "C",
            Unit::Fahrenheit => "F",
        }
    }
}

/// Convert whole degrees Celsius to Fahrenheit
///
/// `c * 1.8 + 32`, keeping the fractional part.
pub fn to_fahrenheit(celsius: i32) -> f32 {
    (celsius as f64 * 1.8 + 32.0) as f32
}

/// Convert Fahrenheit to whole degrees Celsius
///
/// `(f - 32) / 1.8`, truncated toward zero. Converting a Celsius value to
/// Fahrenheit and back can land one degree low (1 °C -> 33.8 °F -> 0 °C).
pub fn to_celsius(fahrenheit: f32) -> i32 {
    ((fahrenheit as f64 - 32.0) / 1.8) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn test_known_points() {
        assert_eq!(to_fahrenheit(0), 32.0);
        assert_eq!(to_fahrenheit(50), 122.0);
        assert_eq!(to_fahrenheit(-40), -40.0);
        assert_eq!(to_celsius(32.0), 0);
        assert_eq!(to_celsius(122.0), 50);
        assert_eq!(to_celsius(212.0), 100);
    }

    #[test]
    fn test_fractional_fahrenheit() {
        let f = to_fahrenheit(1);
        assert!((f - 33.8).abs() < 1e-4);
    }

    #[test]
    fn test_one_celsius_does_not_round_trip() {
        // 33.8 is stored as 33.79999..., which truncates to zero
        assert_eq!(to_celsius(to_fahrenheit(1)), 0);
    }

    #[test]
    fn test_round_trip_mismatches_over_sensor_range() {
        let mismatches: Vec<i32> = (0..=50)
            .filter(|&c| to_celsius(to_fahrenheit(c)) != c)
            .collect();

        assert_eq!(
            mismatches,
            [1, 2, 6, 7, 11, 12, 16, 17, 19, 22, 24, 27, 29, 32, 34, 37, 39, 42, 44, 47, 49]
        );

        // Every mismatch is off by exactly one degree, downward
        for c in mismatches {
            assert_eq!(to_celsius(to_fahrenheit(c)), c - 1);
        }
    }

    #[test]
    fn test_truncation_toward_zero() {
        // -17.77... truncates to -17, not -18
        assert_eq!(to_celsius(0.0), -17);
        // -0.55... truncates to 0
        assert_eq!(to_celsius(31.0), 0);
        assert_eq!(to_celsius(33.0), 0);
        assert_eq!(to_celsius(34.0), 1);
    }

    #[test]
    fn test_unit_toggle_and_encoding() {
        assert_eq!(Unit::default(), Unit::Celsius);
        assert_eq!(Unit::Celsius.toggled(), Unit::Fahrenheit);
        assert_eq!(Unit::Fahrenheit.toggled(), Unit::Celsius);
        assert_eq!(Unit::from_u8(Unit::Fahrenheit.as_u8()), Unit::Fahrenheit);
        assert_eq!(Unit::from_u8(7), Unit::Celsius);
        assert_eq!(Unit::Fahrenheit.symbol(), "F");
    }
}
