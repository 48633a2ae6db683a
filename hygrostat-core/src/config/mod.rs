//! Configuration types
//!
//! Threshold sets entered at the keypad, temperature units, and the
//! device timing loaded from `device.toml`.

pub mod thresholds;
pub mod toml;
pub mod types;
pub mod units;

pub use thresholds::{validate, ThresholdError, ThresholdSet};
pub use toml::{parse_device_config, ParseError};
pub use types::*;
pub use units::{to_celsius, to_fahrenheit, Unit};
