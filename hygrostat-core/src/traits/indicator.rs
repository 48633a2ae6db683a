//! Buzzer and LED trait

/// Trait for the audible/visual indicator pair
pub trait Indicator {
    /// Drive the LED
    fn set_led(&mut self, on: bool);

    /// Drive the buzzer
    fn set_buzzer(&mut self, on: bool);

    /// Drive both outputs together (alert cadence)
    fn set(&mut self, on: bool) {
        self.set_led(on);
        self.set_buzzer(on);
    }
}
