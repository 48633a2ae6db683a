//! In-memory character screen

use crate::traits::DisplayDriver;

/// Characters per line
pub const DISPLAY_COLS: usize = 16;

/// Number of lines
pub const DISPLAY_ROWS: usize = 2;

/// A screen buffer mirroring a 16x2 character LCD
///
/// Text written past the last column is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [[u8; DISPLAY_COLS]; DISPLAY_ROWS],
    col: u8,
    row: u8,
}

impl Screen {
    /// Create a blank screen
    pub const fn new() -> Self {
        Self {
            lines: [[b' '; DISPLAY_COLS]; DISPLAY_ROWS],
            col: 0,
            row: 0,
        }
    }

    /// Get a line of text, padded with spaces to full width
    pub fn line(&self, row: u8) -> &str {
        match self.lines.get(row as usize) {
            Some(line) => core::str::from_utf8(line).unwrap_or(""),
            None => "",
        }
    }

    /// Get a line of text without trailing padding
    pub fn line_trimmed(&self, row: u8) -> &str {
        self.line(row).trim_end()
    }

    /// Cursor position as (col, row)
    pub fn cursor(&self) -> (u8, u8) {
        (self.col, self.row)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayDriver for Screen {
    fn clear(&mut self) {
        self.lines = [[b' '; DISPLAY_COLS]; DISPLAY_ROWS];
        self.col = 0;
        self.row = 0;
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = col.min(DISPLAY_COLS as u8);
        self.row = row.min(DISPLAY_ROWS as u8 - 1);
    }

    fn print(&mut self, text: &str) {
        let line = &mut self.lines[self.row as usize];
        for byte in text.bytes() {
            let Some(cell) = line.get_mut(self.col as usize) else {
                break;
            };
            // Non-ASCII renders as a placeholder
            *cell = if byte.is_ascii() && !byte.is_ascii_control() {
                byte
            } else {
                b'?'
            };
            self.col += 1;
        }
    }
}
