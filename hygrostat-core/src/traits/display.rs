//! Character display trait

/// Trait for character displays
///
/// Writes are fire-and-forget: implementations swallow bus errors, and
/// nothing in the application depends on a write having landed.
pub trait DisplayDriver {
    /// Clear the screen and home the cursor
    fn clear(&mut self);

    /// Move the cursor
    ///
    /// - `col`: Column (0-15)
    /// - `row`: Row (0-1)
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Print ASCII text at the cursor, advancing it
    fn print(&mut self, text: &str);
}
