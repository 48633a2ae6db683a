//! State shared between the execution contexts

pub mod input;
pub mod registers;

pub use input::{InputBuffer, InputSnapshot, MAX_INPUT};
pub use registers::{SharedState, Transition, NO_STAGE};
