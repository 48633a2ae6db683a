//! Board-agnostic core logic for the climate guard firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (sensor, display, indicator, keypad rows, watchdog)
//! - Mode state machine
//! - Shared-state registers and the flag-gated input buffer
//! - Keypad capture pipeline (key map, debounce, dispatch, row scan)
//! - Threshold configuration sequencer and validator
//! - Monitor/alert evaluation
//! - Watchdog supervision
//! - Device configuration types and parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod capture;
pub mod config;
pub mod display;
pub mod monitor;
pub mod safety;
pub mod sequencer;
pub mod shared;
pub mod state;
pub mod traits;
