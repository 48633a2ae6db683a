//! Screen buffer access
//!
//! Contexts render into the shared [`Screen`] under a critical section;
//! the LCD task copies it to the panel when it changed.

use hygrostat_core::display::Screen;

use crate::channels::{SCREEN, SCREEN_UPDATE};

/// Run `f` against the screen buffer
///
/// Wakes the LCD task if the buffer changed.
pub fn update_screen<R>(f: impl FnOnce(&mut Screen) -> R) -> R {
    SCREEN.lock(|cell| {
        let mut screen = cell.borrow_mut();
        let before = screen.clone();
        let result = f(&mut screen);
        if *screen != before {
            SCREEN_UPDATE.signal(());
        }
        result
    })
}

/// Copy of the current screen buffer
pub fn snapshot() -> Screen {
    SCREEN.lock(|cell| cell.borrow().clone())
}
