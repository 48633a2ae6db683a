//! Threshold configuration sequencer
//!
//! Four ordered stages (temperature min/max, humidity min/max), each
//! fed by the keypad through the flag-gated input buffer and accepted
//! with the advance key.

pub mod sequence;
pub mod stage;

pub use sequence::{ConfigSequencer, SequencerStatus};
pub use stage::{Stage, STAGE_COUNT};
