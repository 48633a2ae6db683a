//! Monitor/alert loop
//!
//! Samples the climate sensor, evaluates the sample against the
//! committed thresholds and drives the Monitor <-> Alert edges.

pub mod alert;
pub mod evaluate;
pub mod pacing;

pub use alert::{AlertCadence, AlertPhase};
pub use evaluate::{evaluate, Monitor, MonitorStep};
pub use pacing::ReadPacer;
