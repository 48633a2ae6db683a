//! Climate sensors

pub mod dht11;

pub use dht11::{decode_frame, Dht11, Dht11Error, MIN_READ_INTERVAL_MS};
