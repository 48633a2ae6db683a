//! GPIO keypad rows
//!
//! Rows are driven high one at a time; the column inputs (pulled down)
//! see a rising edge when a key on the energized row is pressed.

use embedded_hal::digital::OutputPin;
use hygrostat_core::traits::keypad::KEYPAD_ROWS;
use hygrostat_core::traits::RowDriver;

/// Four row outputs
pub struct GpioRows<P> {
    pins: [P; KEYPAD_ROWS as usize],
}

impl<P: OutputPin> GpioRows<P> {
    /// Take the row pins, all released
    pub fn new(pins: [P; KEYPAD_ROWS as usize]) -> Self {
        let mut rows = Self { pins };
        rows.release_all();
        rows
    }

    /// Drive every row low
    pub fn release_all(&mut self) {
        for pin in self.pins.iter_mut() {
            let _ = pin.set_low();
        }
    }
}

impl<P: OutputPin> RowDriver for GpioRows<P> {
    fn energize(&mut self, row: u8) {
        self.release_all();
        if let Some(pin) = self.pins.get_mut(row as usize) {
            let _ = pin.set_high();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    #[derive(Default)]
    struct MockPin {
        high: bool,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }
    }

    fn levels(rows: &GpioRows<MockPin>) -> [bool; 4] {
        [0, 1, 2, 3].map(|i| rows.pins[i].high)
    }

    #[test]
    fn test_one_row_at_a_time() {
        let mut rows = GpioRows::new(Default::default());
        assert_eq!(levels(&rows), [false; 4]);

        rows.energize(0);
        assert_eq!(levels(&rows), [true, false, false, false]);
        rows.energize(2);
        assert_eq!(levels(&rows), [false, false, true, false]);
    }

    #[test]
    fn test_out_of_range_row_releases_all() {
        let mut rows = GpioRows::new(Default::default());
        rows.energize(1);
        rows.energize(7);
        assert_eq!(levels(&rows), [false; 4]);
    }
}
