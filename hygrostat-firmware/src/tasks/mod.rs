//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod column;
pub mod display;
pub mod indicator;
pub mod lcd;
pub mod monitor;
pub mod scan;

pub use column::column_task;
pub use display::display_task;
pub use indicator::{indicator_task, AlertOutputs};
pub use lcd::{lcd_task, Lcd};
pub use monitor::{monitor_task, ClimateProbe};
pub use scan::scan_task;
