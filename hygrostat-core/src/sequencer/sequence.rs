//! Sequencer polling loop
//!
//! The sequencer is the sole consumer of the input buffer. The display
//! context calls [`ConfigSequencer::poll`] in a tight loop while the
//! device is configuring; each poll does at most one thing:
//!
//! 1. abandon the sequence if configuration was cancelled
//! 2. start a sequence when configuration begins
//! 3. accept the current stage once the advance key was counted
//! 4. redraw the digits if the input buffer was modified
//!
//! Cancellation is noticed here, at the loop head, never mid-stage.

use super::stage::Stage;
use crate::config::{ThresholdError, ThresholdSet};
use crate::display::{render_input, render_invalid_input, render_prompt};
use crate::shared::SharedState;
use crate::state::Mode;
use crate::traits::DisplayDriver;

/// What a poll did
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerStatus {
    /// Device is not configuring
    Inactive,
    /// Nothing new since the last poll
    Waiting,
    /// A sequence started; the first prompt is shown
    Started,
    /// Input line redrawn after a keystroke
    Redrawn,
    /// A stage was accepted and the next prompt is shown
    Accepted { stage: Stage, value: u32 },
    /// All four stages passed validation and were committed
    Committed(ThresholdSet),
    /// The entered set failed validation; the error message is shown
    Rejected(ThresholdError),
    /// Configuration was cancelled mid-sequence
    Abandoned,
}

/// Four-stage threshold entry
#[derive(Debug, Clone)]
pub struct ConfigSequencer {
    /// Stage being entered, `None` between sequences
    stage: Option<Stage>,
    /// Set being built; starts from the committed set
    candidate: ThresholdSet,
}

impl Default for ConfigSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSequencer {
    /// Create an idle sequencer
    pub const fn new() -> Self {
        Self {
            stage: None,
            candidate: ThresholdSet::FULL_RANGE,
        }
    }

    /// Stage being entered
    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Check if a sequence is in progress
    pub fn is_active(&self) -> bool {
        self.stage.is_some()
    }

    /// Poll shared state once
    pub fn poll<D: DisplayDriver + ?Sized>(
        &mut self,
        shared: &SharedState,
        display: &mut D,
    ) -> SequencerStatus {
        let mode = shared.mode();

        let Some(stage) = self.stage else {
            if mode != Mode::Configure {
                return SequencerStatus::Inactive;
            }
            self.start(shared, display);
            return SequencerStatus::Started;
        };

        // Cancel moved the mode away or dropped the stage counter
        let advances = match shared.stage() {
            Some(advances) if mode == Mode::Configure => advances,
            _ => {
                self.stage = None;
                shared.end_stages();
                return SequencerStatus::Abandoned;
            }
        };

        if advances as usize > stage.index() {
            return self.accept(stage, shared, display);
        }

        match shared.input().take_modified() {
            Some(input) => {
                render_input(display, &input);
                SequencerStatus::Redrawn
            }
            None => SequencerStatus::Waiting,
        }
    }

    fn start<D: DisplayDriver + ?Sized>(&mut self, shared: &SharedState, display: &mut D) {
        self.candidate = shared.thresholds();
        self.stage = Some(Stage::TemperatureMin);
        shared.begin_stages();
        shared.input().reset();
        render_prompt(display, Stage::TemperatureMin.prompt());
    }

    fn accept<D: DisplayDriver + ?Sized>(
        &mut self,
        stage: Stage,
        shared: &SharedState,
        display: &mut D,
    ) -> SequencerStatus {
        // Read the buffer directly: the last digit may not be rendered yet
        let value = shared.input().snapshot().value();

        // At most nine digits, so the value always fits an i32
        match stage {
            Stage::TemperatureMin => self.candidate.set_temp_min(value as i32, shared.unit()),
            Stage::TemperatureMax => self.candidate.set_temp_max(value as i32, shared.unit()),
            Stage::HumidityMin => self.candidate.humidity_min = value,
            Stage::HumidityMax => self.candidate.humidity_max = value,
        }

        if let Some(next) = stage.next() {
            self.stage = Some(next);
            shared.input().reset();
            render_prompt(display, next.prompt());
            return SequencerStatus::Accepted { stage, value };
        }

        self.stage = None;
        if let Err(e) = self.candidate.check() {
            shared.end_stages();
            render_invalid_input(display);
            return SequencerStatus::Rejected(e);
        }

        match shared.commit_thresholds(self.candidate) {
            Some(_) => SequencerStatus::Committed(self.candidate),
            None => {
                shared.end_stages();
                SequencerStatus::Abandoned
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{dispatch, Key};
    use crate::config::Unit;
    use crate::display::Screen;
    use crate::state::Event;

    struct Bench {
        shared: SharedState,
        sequencer: ConfigSequencer,
        screen: Screen,
    }

    impl Bench {
        fn configuring() -> Self {
            let mut bench = Self {
                shared: SharedState::new(),
                sequencer: ConfigSequencer::new(),
                screen: Screen::new(),
            };
            dispatch(Key::EnterConfigure, &bench.shared);
            assert_eq!(bench.poll(), SequencerStatus::Started);
            bench
        }

        fn poll(&mut self) -> SequencerStatus {
            self.sequencer.poll(&self.shared, &mut self.screen)
        }

        fn press(&mut self, key: Key) {
            dispatch(key, &self.shared);
        }

        /// Type a number and advance, polling after each key
        fn enter(&mut self, text: &str) -> SequencerStatus {
            for ch in text.bytes() {
                self.press(Key::Digit(ch - b'0'));
                assert_eq!(self.poll(), SequencerStatus::Redrawn);
            }
            self.press(Key::Advance);
            self.poll()
        }
    }

    #[test]
    fn test_inactive_outside_configure() {
        let shared = SharedState::new();
        let mut sequencer = ConfigSequencer::new();
        let mut screen = Screen::new();
        assert_eq!(sequencer.poll(&shared, &mut screen), SequencerStatus::Inactive);
        assert!(!sequencer.is_active());
    }

    #[test]
    fn test_start_shows_first_prompt() {
        let mut bench = Bench::configuring();
        assert_eq!(bench.screen.line(0), "Min Temperature?");
        assert_eq!(bench.sequencer.stage(), Some(Stage::TemperatureMin));
        assert_eq!(bench.shared.stage(), Some(0));
        assert_eq!(bench.poll(), SequencerStatus::Waiting);
    }

    #[test]
    fn test_full_celsius_sequence_commits() {
        let mut bench = Bench::configuring();

        assert_eq!(
            bench.enter("0"),
            SequencerStatus::Accepted { stage: Stage::TemperatureMin, value: 0 }
        );
        assert_eq!(bench.screen.line(0), "Max Temperature?");

        assert_eq!(
            bench.enter("50"),
            SequencerStatus::Accepted { stage: Stage::TemperatureMax, value: 50 }
        );
        assert_eq!(bench.screen.line_trimmed(0), "Min Humidity?");

        assert_eq!(
            bench.enter("20"),
            SequencerStatus::Accepted { stage: Stage::HumidityMin, value: 20 }
        );
        assert_eq!(bench.screen.line_trimmed(0), "Max Humidity?");

        let expected = ThresholdSet::from_celsius(0, 50, 20, 95);
        assert_eq!(bench.enter("95"), SequencerStatus::Committed(expected));

        assert_eq!(bench.shared.thresholds(), expected);
        assert_eq!(bench.shared.thresholds().temp_max_f, 122.0);
        assert_eq!(bench.shared.mode(), Mode::Monitor);
        assert_eq!(bench.shared.stage(), None);
        assert_eq!(bench.poll(), SequencerStatus::Inactive);
    }

    #[test]
    fn test_out_of_range_rejected_and_restarted() {
        let mut bench = Bench::configuring();

        bench.enter("0");
        bench.enter("60");
        bench.enter("20");
        assert_eq!(
            bench.enter("95"),
            SequencerStatus::Rejected(ThresholdError::CelsiusRange)
        );

        assert_eq!(bench.screen.line_trimmed(0), "Invalid Input");
        assert_eq!(bench.screen.line_trimmed(1), "Please Try Again");
        assert_eq!(bench.shared.thresholds(), ThresholdSet::FULL_RANGE);
        assert_eq!(bench.shared.mode(), Mode::Configure);

        // Sequence restarts from the first stage
        assert_eq!(bench.poll(), SequencerStatus::Started);
        assert_eq!(bench.sequencer.stage(), Some(Stage::TemperatureMin));
        assert_eq!(bench.screen.line(0), "Min Temperature?");
    }

    #[test]
    fn test_fahrenheit_entry() {
        let mut bench = Bench::configuring();
        bench.shared.toggle_unit();

        bench.enter("50");
        bench.enter("100");
        bench.enter("30");
        assert!(matches!(bench.enter("70"), SequencerStatus::Committed(_)));

        let set = bench.shared.thresholds();
        assert_eq!(set.temp_min_c, 10);
        assert_eq!(set.temp_max_c, 37);
        assert_eq!(set.temp_min_f, 50.0);
        assert_eq!(set.temp_max_f, 100.0);
    }

    #[test]
    fn test_cancel_preempts_sequence() {
        let mut bench = Bench::configuring();
        bench.enter("10");
        bench.press(Key::Digit(4));

        bench.press(Key::Cancel);
        assert_eq!(bench.shared.mode(), Mode::Idle);
        assert_eq!(bench.poll(), SequencerStatus::Abandoned);
        assert!(!bench.sequencer.is_active());
        assert_eq!(bench.shared.thresholds(), ThresholdSet::FULL_RANGE);
        assert_eq!(bench.poll(), SequencerStatus::Inactive);
    }

    #[test]
    fn test_cancel_then_reenter_restarts() {
        let mut bench = Bench::configuring();
        bench.enter("10");

        // Both keys land before the sequencer polls again
        bench.press(Key::Cancel);
        bench.press(Key::EnterConfigure);
        assert_eq!(bench.shared.mode(), Mode::Configure);

        assert_eq!(bench.poll(), SequencerStatus::Abandoned);
        assert_eq!(bench.poll(), SequencerStatus::Started);
        assert_eq!(bench.sequencer.stage(), Some(Stage::TemperatureMin));
    }

    #[test]
    fn test_empty_stage_reads_as_zero() {
        let mut bench = Bench::configuring();
        bench.press(Key::Advance);
        assert_eq!(
            bench.poll(),
            SequencerStatus::Accepted { stage: Stage::TemperatureMin, value: 0 }
        );
    }

    #[test]
    fn test_double_advance_accepts_one_stage_per_poll() {
        let mut bench = Bench::configuring();
        bench.press(Key::Digit(5));
        bench.press(Key::Advance);
        bench.press(Key::Advance);

        assert_eq!(
            bench.poll(),
            SequencerStatus::Accepted { stage: Stage::TemperatureMin, value: 5 }
        );
        assert_eq!(
            bench.poll(),
            SequencerStatus::Accepted { stage: Stage::TemperatureMax, value: 0 }
        );
        assert_eq!(bench.sequencer.stage(), Some(Stage::HumidityMin));
    }

    #[test]
    fn test_unrendered_digit_still_counted() {
        let mut bench = Bench::configuring();
        bench.press(Key::Digit(2));
        assert_eq!(bench.poll(), SequencerStatus::Redrawn);
        // Second digit and advance land between polls
        bench.press(Key::Digit(5));
        bench.press(Key::Advance);
        assert_eq!(
            bench.poll(),
            SequencerStatus::Accepted { stage: Stage::TemperatureMin, value: 25 }
        );
    }

    #[test]
    fn test_clear_key_redraws_empty_line() {
        let mut bench = Bench::configuring();
        bench.press(Key::Digit(7));
        bench.poll();
        assert_eq!(bench.screen.line_trimmed(1), "7");

        bench.press(Key::ClearOrToggle);
        assert_eq!(bench.poll(), SequencerStatus::Redrawn);
        assert_eq!(bench.screen.line_trimmed(1), "");
        assert_eq!(bench.shared.unit(), Unit::Celsius);
    }

    #[test]
    fn test_starts_from_committed_set() {
        let shared = SharedState::new();
        shared.apply(Event::EnterConfigure);
        shared.begin_stages();
        let committed = ThresholdSet::from_celsius(5, 40, 30, 80);
        shared.commit_thresholds(committed);

        let mut bench = Bench {
            shared,
            sequencer: ConfigSequencer::new(),
            screen: Screen::new(),
        };
        bench.press(Key::EnterConfigure);
        assert_eq!(bench.poll(), SequencerStatus::Started);
        assert_eq!(bench.sequencer.candidate, committed);
    }
}
