//! Shared-state registers
//!
//! One container per device, handed by reference to every execution
//! context. Each field has its own discipline:
//!
//! - Mode, unit, row index, stage counter: single atomic bytes
//! - Input buffer: flag-gated, see [`InputBuffer`]
//! - Thresholds, last sample: last-writer-wins cells behind a
//!   critical-section mutex
//!
//! No operation holds more than one of these at a time.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicU8, Ordering};

use super::input::InputBuffer;
use crate::config::{ThresholdSet, Unit};
use crate::sequencer::STAGE_COUNT;
use crate::state::{Event, Mode};
use crate::traits::Sample;

/// Stage register value outside a configuration sequence
pub const NO_STAGE: u8 = u8::MAX;

/// Result of applying an event to the mode register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
}

impl Transition {
    /// Check if the mode actually changed
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Device-wide shared state
pub struct SharedState {
    mode: AtomicU8,
    unit: AtomicU8,
    row: AtomicU8,
    stage: AtomicU8,
    input: InputBuffer,
    thresholds: Mutex<CriticalSectionRawMutex, Cell<ThresholdSet>>,
    sample: Mutex<CriticalSectionRawMutex, Cell<Option<Sample>>>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedState {
    /// Power-on state: Idle, Celsius, full-range thresholds, no sample
    pub const fn new() -> Self {
        Self {
            mode: AtomicU8::new(Mode::Idle.as_u8()),
            unit: AtomicU8::new(Unit::Celsius.as_u8()),
            row: AtomicU8::new(0),
            stage: AtomicU8::new(NO_STAGE),
            input: InputBuffer::new(),
            thresholds: Mutex::new(Cell::new(ThresholdSet::FULL_RANGE)),
            sample: Mutex::new(Cell::new(None)),
        }
    }

    // ========== Mode ==========

    /// Current mode
    pub fn mode(&self) -> Mode {
        Mode::from_u8(self.mode.load(Ordering::Acquire))
    }

    /// Apply an event through the transition table
    ///
    /// The read-transition-write is one atomic update, so concurrent
    /// events from the keypad and the monitor never overwrite each other.
    pub fn apply(&self, event: Event) -> Transition {
        let from = self
            .mode
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |raw| {
                Some(Mode::from_u8(raw).transition(event).as_u8())
            })
            .unwrap_or_else(|raw| raw);
        let from = Mode::from_u8(from);

        Transition {
            from,
            to: from.transition(event),
        }
    }

    // ========== Unit ==========

    /// Active temperature unit
    pub fn unit(&self) -> Unit {
        Unit::from_u8(self.unit.load(Ordering::Acquire))
    }

    /// Switch between Celsius and Fahrenheit, returning the new unit
    pub fn toggle_unit(&self) -> Unit {
        let old = self.unit.fetch_xor(1, Ordering::AcqRel);
        Unit::from_u8(old).toggled()
    }

    // ========== Row index ==========

    /// Row currently energized by the scan loop
    pub fn row(&self) -> u8 {
        self.row.load(Ordering::Acquire)
    }

    /// Publish the energized row (scan loop only)
    pub fn set_row(&self, row: u8) {
        self.row.store(row, Ordering::Release);
    }

    // ========== Stage counter ==========

    /// Advance presses counted since the sequence started
    ///
    /// `None` outside a configuration sequence.
    pub fn stage(&self) -> Option<u8> {
        match self.stage.load(Ordering::Acquire) {
            NO_STAGE => None,
            stage => Some(stage),
        }
    }

    /// Start counting advance presses (sequencer)
    pub fn begin_stages(&self) {
        self.stage.store(0, Ordering::Release);
    }

    /// Count one advance press
    ///
    /// Returns `false` when no sequence is running or every stage has
    /// already been advanced.
    pub fn advance_stage(&self) -> bool {
        self.stage
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |stage| {
                if stage == NO_STAGE || stage as usize >= STAGE_COUNT {
                    None
                } else {
                    Some(stage + 1)
                }
            })
            .is_ok()
    }

    /// Stop counting advance presses
    pub fn end_stages(&self) {
        self.stage.store(NO_STAGE, Ordering::Release);
    }

    // ========== Input buffer ==========

    /// The flag-gated digit buffer
    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    // ========== Thresholds ==========

    /// The committed threshold set
    pub fn thresholds(&self) -> ThresholdSet {
        self.thresholds.lock(|cell| cell.get())
    }

    /// Commit a validated set and leave configuration
    ///
    /// Refuses an invalid set, and a set arriving after configuration
    /// was cancelled; the committed set is left unchanged in both cases.
    pub fn commit_thresholds(&self, set: ThresholdSet) -> Option<Transition> {
        if !set.is_valid() {
            return None;
        }
        // Mode and set change together: no context sees Monitor with the old set
        let transition = self.thresholds.lock(|cell| {
            let transition = self.apply(Event::ThresholdsCommitted);
            if transition.from != Mode::Configure {
                return None;
            }
            cell.set(set);
            Some(transition)
        })?;
        self.end_stages();
        Some(transition)
    }

    // ========== Sample ==========

    /// Most recent successful reading
    pub fn sample(&self) -> Option<Sample> {
        self.sample.lock(|cell| cell.get())
    }

    /// Overwrite the most recent reading
    pub fn store_sample(&self, sample: Sample) {
        self.sample.lock(|cell| cell.set(Some(sample)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BreachCause;

    #[test]
    fn test_power_on_defaults() {
        let shared = SharedState::new();
        assert_eq!(shared.mode(), Mode::Idle);
        assert_eq!(shared.unit(), Unit::Celsius);
        assert_eq!(shared.thresholds(), ThresholdSet::FULL_RANGE);
        assert_eq!(shared.sample(), None);
        assert_eq!(shared.stage(), None);
        assert!(shared.input().is_empty());
    }

    #[test]
    fn test_apply_reports_transition() {
        let shared = SharedState::new();

        let t = shared.apply(Event::EnterConfigure);
        assert_eq!(t, Transition { from: Mode::Idle, to: Mode::Configure });
        assert!(t.changed());

        // Breach is not an edge out of Configure
        let t = shared.apply(Event::Breach(BreachCause::HumidityTooLow));
        assert!(!t.changed());
        assert_eq!(shared.mode(), Mode::Configure);
    }

    #[test]
    fn test_toggle_unit() {
        let shared = SharedState::new();
        assert_eq!(shared.toggle_unit(), Unit::Fahrenheit);
        assert_eq!(shared.unit(), Unit::Fahrenheit);
        assert_eq!(shared.toggle_unit(), Unit::Celsius);
    }

    #[test]
    fn test_unit_toggle_leaves_thresholds() {
        let shared = SharedState::new();
        let before = shared.thresholds();
        shared.toggle_unit();
        assert_eq!(shared.thresholds(), before);
    }

    #[test]
    fn test_stage_counter() {
        let shared = SharedState::new();
        assert!(!shared.advance_stage());

        shared.begin_stages();
        assert_eq!(shared.stage(), Some(0));
        for expected in 1..=STAGE_COUNT as u8 {
            assert!(shared.advance_stage());
            assert_eq!(shared.stage(), Some(expected));
        }
        assert!(!shared.advance_stage());

        shared.end_stages();
        assert_eq!(shared.stage(), None);
    }

    #[test]
    fn test_commit_valid_thresholds() {
        let shared = SharedState::new();
        shared.apply(Event::EnterConfigure);
        shared.begin_stages();

        let set = ThresholdSet::from_celsius(10, 30, 40, 60);
        let t = shared.commit_thresholds(set).unwrap();
        assert_eq!(t.to, Mode::Monitor);
        assert_eq!(shared.thresholds(), set);
        assert_eq!(shared.stage(), None);
    }

    #[test]
    fn test_commit_invalid_thresholds_refused() {
        let shared = SharedState::new();
        shared.apply(Event::EnterConfigure);

        let set = ThresholdSet::from_celsius(0, 60, 20, 95);
        assert_eq!(shared.commit_thresholds(set), None);
        assert_eq!(shared.thresholds(), ThresholdSet::FULL_RANGE);
        assert_eq!(shared.mode(), Mode::Configure);
    }

    #[test]
    fn test_commit_after_cancel_refused() {
        let shared = SharedState::new();
        shared.apply(Event::EnterConfigure);
        shared.apply(Event::Cancel);

        let set = ThresholdSet::from_celsius(10, 30, 40, 60);
        assert_eq!(shared.commit_thresholds(set), None);
        assert_eq!(shared.thresholds(), ThresholdSet::FULL_RANGE);
        assert_eq!(shared.mode(), Mode::Idle);
    }

    #[test]
    fn test_monitor_never_observed_with_old_thresholds() {
        let set = ThresholdSet::from_celsius(10, 30, 40, 60);

        for _ in 0..200 {
            let shared = SharedState::new();
            shared.apply(Event::EnterConfigure);
            shared.begin_stages();

            std::thread::scope(|s| {
                let reader = s.spawn(|| loop {
                    if shared.mode() == Mode::Monitor {
                        return shared.thresholds();
                    }
                    std::hint::spin_loop();
                });
                shared.commit_thresholds(set).unwrap();
                assert_eq!(reader.join().unwrap(), set);
            });
        }
    }

    #[test]
    fn test_sample_last_writer_wins() {
        let shared = SharedState::new();
        shared.store_sample(Sample::new(20, 40));
        shared.store_sample(Sample::new(21, 41));
        assert_eq!(shared.sample(), Some(Sample::new(21, 41)));
    }
}
