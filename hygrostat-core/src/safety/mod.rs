//! Watchdog supervision
//!
//! A dead-man's switch on the scan loop: armed once at start-up, fed
//! once per scan iteration, nothing else.

pub mod liveness;
pub mod supervisor;

pub use liveness::LivenessTimer;
pub use supervisor::Supervisor;
