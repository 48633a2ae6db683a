//! Key dispatch
//!
//! Applies one resolved key to shared state. Runs in the scan loop, so
//! it must stay short: no I/O, no waiting.

use super::keymap::Key;
use crate::config::Unit;
use crate::shared::{SharedState, Transition};
use crate::state::{Event, Mode};

/// What a dispatched key did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyOutcome {
    /// Digit appended to the input buffer
    Appended(u8),
    /// Digit dropped (not configuring, or buffer full)
    Dropped(u8),
    /// Current configuration stage accepted
    Advanced,
    /// Mode changed
    ModeChanged(Transition),
    /// Input buffer cleared
    Cleared,
    /// Display unit switched
    UnitToggled(Unit),
    /// Key has no effect in the current mode
    Ignored,
}

/// Apply `key` to shared state
pub fn dispatch(key: Key, shared: &SharedState) -> KeyOutcome {
    match key {
        Key::Digit(digit) => {
            if shared.mode().accepts_digits() && shared.input().push(digit) {
                KeyOutcome::Appended(digit)
            } else {
                KeyOutcome::Dropped(digit)
            }
        }

        Key::Advance => {
            if shared.advance_stage() {
                KeyOutcome::Advanced
            } else {
                KeyOutcome::Ignored
            }
        }

        Key::Cancel => {
            let transition = shared.apply(Event::Cancel);
            if transition.from == Mode::Configure {
                // Sequencer sees the stage counter gone and abandons
                shared.end_stages();
            }
            mode_outcome(transition)
        }

        Key::ClearOrToggle => {
            if shared.mode() == Mode::Configure {
                shared.input().clear();
                KeyOutcome::Cleared
            } else {
                KeyOutcome::UnitToggled(shared.toggle_unit())
            }
        }

        Key::EnterConfigure => mode_outcome(shared.apply(Event::EnterConfigure)),

        Key::Star | Key::Hash => KeyOutcome::Ignored,
    }
}

fn mode_outcome(transition: Transition) -> KeyOutcome {
    if transition.changed() {
        KeyOutcome::ModeChanged(transition)
    } else {
        KeyOutcome::Ignored
    }
}
