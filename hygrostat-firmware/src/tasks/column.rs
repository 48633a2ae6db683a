//! Keypad column tasks
//!
//! One task per column waits for press edges. Accepted presses are
//! resolved against the row the scan loop has energized and queued for
//! dispatch; each one also requests an LED flash.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use hygrostat_core::capture::ColumnHandler;
use hygrostat_core::config::KeypadConfig;

use crate::channels::{FLASH_CHANNEL, KEY_CHANNEL, SHARED};

/// Column task - edge capture and debounce
#[embassy_executor::task(pool_size = 4)]
pub async fn column_task(mut pin: Input<'static>, col: u8, config: KeypadConfig) {
    debug!("Column {} task started", col);

    let mut handler = ColumnHandler::new(col, config.debounce_ms);

    loop {
        pin.wait_for_rising_edge().await;

        let Some(key) = handler.on_edge(Instant::now().as_millis(), &SHARED) else {
            continue;
        };

        debug!("Column {}: {}", col, key);
        if KEY_CHANNEL.try_send(key).is_err() {
            warn!("Key queue full, {} dropped", key);
        }
        // Acknowledgement is best-effort
        let _ = FLASH_CHANNEL.try_send(config.flash_ms);
    }
}
