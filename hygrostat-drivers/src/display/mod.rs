//! Character displays

pub mod jhd1802;

pub use jhd1802::{Jhd1802, LCD_ADDRESS};
