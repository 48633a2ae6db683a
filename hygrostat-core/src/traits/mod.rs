//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod display;
pub mod indicator;
pub mod keypad;
pub mod sensor;
pub mod watchdog;

pub use display::DisplayDriver;
pub use indicator::Indicator;
pub use keypad::RowDriver;
pub use sensor::{ClimateSensor, Sample, SensorError};
pub use watchdog::Watchdog;
