//! Keypad row driver trait

/// Number of rows on the matrix keypad
pub const KEYPAD_ROWS: u8 = 4;

/// Number of columns on the matrix keypad
pub const KEYPAD_COLS: u8 = 4;

/// Trait for the row side of a matrix keypad
///
/// Exactly one row is energized at a time; the columns report which
/// energized row produced a press.
pub trait RowDriver {
    /// Energize `row` (0-3) and release the others
    fn energize(&mut self, row: u8);
}
