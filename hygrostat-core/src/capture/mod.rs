//! Keypad capture pipeline
//!
//! Column edge -> debounce -> key resolution (from the published row)
//! -> bounded queue -> dispatch in the scan loop. Only dispatch touches
//! shared state; the column side never blocks.

pub mod debounce;
pub mod dispatch;
pub mod keymap;
pub mod scan;

pub use debounce::{ColumnHandler, Debouncer};
pub use dispatch::{dispatch, KeyOutcome};
pub use keymap::{resolve, Key};
pub use scan::ScanLoop;
