//! 4x4 keypad layout
//!
//! ```text
//!        col0 col1 col2 col3
//! row0    1    2    3    A   advance
//! row1    4    5    6    B   cancel
//! row2    7    8    9    C   clear / toggle unit
//! row3    *    0    #    D   enter configuration
//! ```

use crate::traits::keypad::{KEYPAD_COLS, KEYPAD_ROWS};

/// A resolved key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// Decimal digit 0-9
    Digit(u8),
    /// A: accept the current configuration stage
    Advance,
    /// B: return to idle
    Cancel,
    /// C: clear input while configuring, otherwise toggle the unit
    ClearOrToggle,
    /// D: start configuration
    EnterConfigure,
    /// `*` (no function)
    Star,
    /// `#` (no function)
    Hash,
}

const LAYOUT: [[Key; KEYPAD_COLS as usize]; KEYPAD_ROWS as usize] = [
    [Key::Digit(1), Key::Digit(2), Key::Digit(3), Key::Advance],
    [Key::Digit(4), Key::Digit(5), Key::Digit(6), Key::Cancel],
    [Key::Digit(7), Key::Digit(8), Key::Digit(9), Key::ClearOrToggle],
    [Key::Star, Key::Digit(0), Key::Hash, Key::EnterConfigure],
];

/// Resolve the key at an energized row and a triggered column
pub fn resolve(row: u8, col: u8) -> Option<Key> {
    LAYOUT
        .get(row as usize)
        .and_then(|keys| keys.get(col as usize))
        .copied()
}
