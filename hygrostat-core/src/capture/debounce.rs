//! Per-column edge debouncing

use super::keymap::{resolve, Key};
use crate::shared::SharedState;

/// Refractory-window debouncer
///
/// Accepts an edge only if no edge was accepted in the last `window_ms`.
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    window_ms: u32,
    last_accepted_ms: Option<u64>,
}

impl Debouncer {
    /// Create a debouncer with the given refractory window
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            last_accepted_ms: None,
        }
    }

    /// Offer an edge seen at `now_ms`
    pub fn accept(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms.saturating_sub(last) < self.window_ms as u64 {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }
}

/// Column edge handler
///
/// Debounces the column and resolves the key from the row index the
/// scan loop published. Never touches anything but the row register.
#[derive(Debug, Clone, Copy)]
pub struct ColumnHandler {
    col: u8,
    debouncer: Debouncer,
}

impl ColumnHandler {
    /// Create a handler for column `col`
    pub const fn new(col: u8, debounce_ms: u32) -> Self {
        Self {
            col,
            debouncer: Debouncer::new(debounce_ms),
        }
    }

    /// Column index
    pub fn col(&self) -> u8 {
        self.col
    }

    /// Handle a press edge at `now_ms`
    ///
    /// Returns `None` for a bounce or an unmapped row.
    pub fn on_edge(&mut self, now_ms: u64, shared: &SharedState) -> Option<Key> {
        if !self.debouncer.accept(now_ms) {
            return None;
        }
        resolve(shared.row(), self.col)
    }
}
