//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in hygrostat-core, on top of `embedded-hal` 1.0:
//!
//! - Climate sensor (DHT11)
//! - Character display (JHD1802 16x2 I2C LCD)
//! - Indicator (GPIO buzzer and LED)
//! - Keypad rows (GPIO)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod indicator;
pub mod keypad;
pub mod sensor;
