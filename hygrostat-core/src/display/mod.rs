//! Screen model and message rendering
//!
//! The device has a 16x2 character LCD. Everything renders through the
//! [`DisplayDriver`](crate::traits::DisplayDriver) trait, usually into a
//! [`Screen`] that the firmware flushes to the panel.

pub mod render;
pub mod screen;

pub use render::{
    render_breach, render_climate, render_input, render_invalid_input, render_prompt,
};
pub use screen::{Screen, DISPLAY_COLS, DISPLAY_ROWS};
