//! Mode state machine
//!
//! Defines the authoritative operating mode of the device.
//! The state machine is explicit, finite, and deterministic; every
//! mode change anywhere in the firmware goes through [`Mode::transition`].

pub mod events;
pub mod machine;

pub use events::{BreachCause, Event};
pub use machine::Mode;
