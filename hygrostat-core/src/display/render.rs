//! Message rendering
//!
//! Every screen the device shows, written through [`DisplayDriver`].

use core::fmt::Write;

use heapless::String;

use super::screen::DISPLAY_COLS;
use crate::config::Unit;
use crate::shared::InputSnapshot;
use crate::state::BreachCause;
use crate::traits::{DisplayDriver, Sample};

/// Blank line used to wipe the input row
const BLANK_LINE: &str = "                ";

/// Render live temperature and humidity
///
/// Shows `--` until the first successful sample.
pub fn render_climate<D: DisplayDriver + ?Sized>(display: &mut D, sample: Option<Sample>, unit: Unit) {
    let mut temp: String<DISPLAY_COLS> = String::new();
    let mut humidity: String<DISPLAY_COLS> = String::new();

    let _ = write!(temp, "Temp ({}): ", unit.symbol());
    let _ = humidity.push_str("Humidity: ");

    match sample {
        Some(sample) => {
            let _ = match unit {
                Unit::Celsius => write!(temp, "{}", sample.celsius),
                Unit::Fahrenheit => write!(temp, "{:.1}", sample.temperature(unit)),
            };
            let _ = write!(humidity, "{}", sample.humidity);
        }
        None => {
            let _ = temp.push_str("--");
            let _ = humidity.push_str("--");
        }
    }

    display.clear();
    display.print(&temp);
    display.set_cursor(0, 1);
    display.print(&humidity);
}

/// Render a configuration prompt with an empty input line
pub fn render_prompt<D: DisplayDriver + ?Sized>(display: &mut D, prompt: &str) {
    display.clear();
    display.print(prompt);
    display.set_cursor(0, 1);
}

/// Redraw the digits entered so far on line 1
pub fn render_input<D: DisplayDriver + ?Sized>(display: &mut D, input: &InputSnapshot) {
    display.set_cursor(0, 1);
    display.print(BLANK_LINE);
    display.set_cursor(0, 1);
    display.print(input.as_str());
}

/// Render the rejected-configuration message
pub fn render_invalid_input<D: DisplayDriver + ?Sized>(display: &mut D) {
    display.clear();
    display.print("Invalid Input");
    display.set_cursor(0, 1);
    display.print("Please Try Again");
}

/// Render the cause-specific breach message
pub fn render_breach<D: DisplayDriver + ?Sized>(display: &mut D, cause: BreachCause) {
    display.clear();
    match cause {
        BreachCause::TemperatureTooLow => {
            display.print("Temperature Too");
            display.set_cursor(6, 1);
            display.print("Low");
        }
        BreachCause::TemperatureTooHigh => {
            display.print("Temperature Too");
            display.set_cursor(6, 1);
            display.print("High");
        }
        BreachCause::HumidityTooLow => {
            display.print("Humidity Too Low");
        }
        BreachCause::HumidityTooHigh => {
            display.print("Humidity Too");
            display.set_cursor(6, 1);
            display.print("High");
        }
    }
}
