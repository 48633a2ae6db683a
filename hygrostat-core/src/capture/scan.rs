//! Row-scan scheduling loop
//!
//! One iteration: publish and energize the next row, feed the watchdog,
//! dispatch at most one queued key. The caller owns the wait between
//! iterations.

use super::dispatch::{dispatch, KeyOutcome};
use super::keymap::Key;
use crate::safety::Supervisor;
use crate::shared::SharedState;
use crate::traits::keypad::KEYPAD_ROWS;
use crate::traits::{RowDriver, Watchdog};

/// The scan loop state
pub struct ScanLoop<R: RowDriver, W: Watchdog> {
    rows: R,
    supervisor: Supervisor<W>,
    /// Row energized by the previous iteration
    row: u8,
}

impl<R: RowDriver, W: Watchdog> ScanLoop<R, W> {
    /// Create a scan loop; the first iteration energizes row 0
    pub fn new(rows: R, supervisor: Supervisor<W>) -> Self {
        Self {
            rows,
            supervisor,
            row: KEYPAD_ROWS - 1,
        }
    }

    /// Row energized by the last iteration
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Access the supervisor
    pub fn supervisor(&self) -> &Supervisor<W> {
        &self.supervisor
    }

    /// Mutable access to the supervisor (arming at start-up)
    pub fn supervisor_mut(&mut self) -> &mut Supervisor<W> {
        &mut self.supervisor
    }

    /// Run one iteration
    ///
    /// `pending` is the next queued key, if any.
    pub fn iterate(&mut self, shared: &SharedState, pending: Option<Key>) -> Option<KeyOutcome> {
        self.row = (self.row + 1) % KEYPAD_ROWS;
        shared.set_row(self.row);
        self.rows.energize(self.row);

        self.supervisor.feed();

        pending.map(|key| dispatch(key, shared))
    }
}
