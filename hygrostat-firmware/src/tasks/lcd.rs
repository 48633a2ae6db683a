//! LCD refresh task

use defmt::*;
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;

use hygrostat_drivers::display::Jhd1802;

use crate::channels::SCREEN_UPDATE;
use crate::screen::snapshot;

/// The board's LCD
pub type Lcd = Jhd1802<I2c<'static, I2C0, Blocking>, Delay>;

/// LCD task - copies the screen buffer to the panel when it changes
#[embassy_executor::task]
pub async fn lcd_task(mut lcd: Lcd) {
    info!("LCD task started");

    loop {
        SCREEN_UPDATE.wait().await;

        let screen = snapshot();
        if let Err(e) = lcd.show(&screen) {
            warn!("LCD write failed: {}", e);
        }
    }
}
