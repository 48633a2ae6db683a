//! Threshold evaluation

use crate::config::{ThresholdSet, Unit};
use crate::display::render_breach;
use crate::shared::SharedState;
use crate::state::{BreachCause, Event, Mode};
use crate::traits::{ClimateSensor, DisplayDriver, Sample, SensorError};

/// Find the first bound `sample` breaches, in `unit`
///
/// Checked in order: temperature low, temperature high, humidity low,
/// humidity high. Only the first match is reported.
pub fn evaluate(sample: &Sample, thresholds: &ThresholdSet, unit: Unit) -> Option<BreachCause> {
    let (too_low, too_high) = match unit {
        Unit::Celsius => {
            let t = sample.celsius as i32;
            (t < thresholds.temp_min_c, t > thresholds.temp_max_c)
        }
        Unit::Fahrenheit => {
            let t = sample.fahrenheit;
            (t < thresholds.temp_min_f, t > thresholds.temp_max_f)
        }
    };

    let humidity = sample.humidity as u32;

    if too_low {
        Some(BreachCause::TemperatureTooLow)
    } else if too_high {
        Some(BreachCause::TemperatureTooHigh)
    } else if humidity < thresholds.humidity_min {
        Some(BreachCause::HumidityTooLow)
    } else if humidity > thresholds.humidity_max {
        Some(BreachCause::HumidityTooHigh)
    } else {
        None
    }
}

/// Result of one monitor step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonitorStep {
    /// Sampled for the live display only (Idle, Configure)
    Background,
    /// Sensor read failed; previous sample kept, nothing evaluated
    SensorFault(SensorError),
    /// Monitoring and within thresholds
    InRange,
    /// Breach detected or still present
    Alerting(BreachCause),
    /// Breach cleared; back to Monitor
    Recovered,
}

/// Monitor state carried between steps
#[derive(Debug, Clone, Default)]
pub struct Monitor {
    /// Cause currently shown on the display
    shown: Option<BreachCause>,
}

impl Monitor {
    /// Create a monitor with nothing displayed
    pub const fn new() -> Self {
        Self { shown: None }
    }

    /// Breach message currently on the display
    pub fn shown(&self) -> Option<BreachCause> {
        self.shown
    }

    /// Take a sample and evaluate it
    pub fn step<S, D>(&mut self, shared: &SharedState, sensor: &mut S, display: &mut D) -> MonitorStep
    where
        S: ClimateSensor + ?Sized,
        D: DisplayDriver + ?Sized,
    {
        let reading = sensor.read();
        self.process(shared, reading, display)
    }

    /// Evaluate a reading taken by the caller
    pub fn process<D: DisplayDriver + ?Sized>(
        &mut self,
        shared: &SharedState,
        reading: Result<Sample, SensorError>,
        display: &mut D,
    ) -> MonitorStep {
        let sample = match reading {
            Ok(sample) => {
                shared.store_sample(sample);
                sample
            }
            Err(e) => return MonitorStep::SensorFault(e),
        };

        let mode = shared.mode();
        if mode != Mode::Alert {
            self.shown = None;
        }
        if !mode.evaluates_thresholds() {
            return MonitorStep::Background;
        }

        let cause = evaluate(&sample, &shared.thresholds(), shared.unit());

        match (mode, cause) {
            (Mode::Monitor, None) => MonitorStep::InRange,
            (_, Some(cause)) => {
                let transition = shared.apply(Event::Breach(cause));
                // An operator command may have won the race for the mode
                if transition.to == Mode::Alert && self.shown != Some(cause) {
                    render_breach(display, cause);
                    self.shown = Some(cause);
                }
                MonitorStep::Alerting(cause)
            }
            (_, None) => {
                shared.apply(Event::BreachCleared);
                self.shown = None;
                MonitorStep::Recovered
            }
        }
    }
}
