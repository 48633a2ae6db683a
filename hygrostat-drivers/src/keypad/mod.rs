//! Matrix keypad row outputs

pub mod rows;

pub use rows::GpioRows;
