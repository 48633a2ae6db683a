//! GPIO buzzer and LED
//!
//! Both outputs are plain GPIOs, driving the parts directly or through
//! a transistor. Each can be active-high (default) or active-low.

use embedded_hal::digital::OutputPin;
use hygrostat_core::traits::Indicator;

/// One GPIO output with polarity and logical state
struct Output<P> {
    pin: P,
    /// If true, ON = pin LOW
    inverted: bool,
    /// Current logical state
    on: bool,
}

impl<P: OutputPin> Output<P> {
    fn new(pin: P, inverted: bool) -> Self {
        let mut output = Self {
            pin,
            inverted,
            on: false,
        };
        // Ensure output starts off
        output.set(false);
        output
    }

    fn set(&mut self, on: bool) {
        self.on = on;

        // Normal: on=true, inverted=false -> high
        // Inverted: on=true, inverted=true -> low
        let _ = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }
}

/// GPIO buzzer/LED pair
pub struct GpioIndicator<L, B> {
    led: Output<L>,
    buzzer: Output<B>,
}

impl<L: OutputPin, B: OutputPin> GpioIndicator<L, B> {
    /// Create an indicator with explicit polarity
    ///
    /// # Arguments
    /// - `led`, `buzzer`: The GPIO pins to control
    /// - `led_inverted`, `buzzer_inverted`: If true, the output is ON
    ///   when its pin is LOW
    pub fn new(led: L, led_inverted: bool, buzzer: B, buzzer_inverted: bool) -> Self {
        Self {
            led: Output::new(led, led_inverted),
            buzzer: Output::new(buzzer, buzzer_inverted),
        }
    }

    /// Create an indicator with both outputs active-high
    pub fn new_active_high(led: L, buzzer: B) -> Self {
        Self::new(led, false, buzzer, false)
    }

    /// Check if the LED is on
    pub fn led_on(&self) -> bool {
        self.led.on
    }

    /// Check if the buzzer is on
    pub fn buzzer_on(&self) -> bool {
        self.buzzer.on
    }
}

impl<L: OutputPin, B: OutputPin> Indicator for GpioIndicator<L, B> {
    fn set_led(&mut self, on: bool) {
        self.led.set(on);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self { high: false }
        }
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

    #[test]
    fn test_active_high_outputs() {
        let mut indicator = GpioIndicator::new_active_high(MockPin::new(), MockPin::new());

        // Initially off
        assert!(!indicator.led_on());
        assert!(!indicator.led.pin.high);

        indicator.set_led(true);
        assert!(indicator.led_on());
        assert!(indicator.led.pin.high);
        assert!(!indicator.buzzer.pin.high);

        indicator.set_led(false);
        assert!(!indicator.led.pin.high);
    }

    #[test]
    fn test_active_low_buzzer() {
        let mut indicator = GpioIndicator::new(MockPin::new(), false, MockPin::new(), true);

        // Initially off (pin is high for active-low)
        assert!(!indicator.buzzer_on());
        assert!(indicator.buzzer.pin.high);

        // Turn on (pin goes low for active-low)
        indicator.set_buzzer(true);
        assert!(indicator.buzzer_on());
        assert!(!indicator.buzzer.pin.high);
    }

    #[test]
    fn test_set_drives_both() {
        let mut indicator = GpioIndicator::new_active_high(MockPin::new(), MockPin::new());

        // Use trait method through concrete type
        fn alert<I: Indicator>(i: &mut I) {
            i.set(true);
        }

        alert(&mut indicator);
        assert!(indicator.led_on() && indicator.buzzer_on());
        indicator.set(false);
        assert!(!indicator.led.pin.high && !indicator.buzzer.pin.high);
    }
}
