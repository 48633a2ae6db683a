//! Buzzer and LED outputs

pub mod gpio;

pub use gpio::GpioIndicator;
