//! Inter-task communication channels
//!
//! Shared registers, key and flash queues, the screen buffer and the wake
//! signals used between Embassy tasks.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use hygrostat_core::capture::Key;
use hygrostat_core::display::Screen;
use hygrostat_core::shared::SharedState;

/// Channel capacity for accepted key presses
const KEY_CHANNEL_SIZE: usize = 8;

/// Channel capacity for LED acknowledgement requests
const FLASH_CHANNEL_SIZE: usize = 4;

/// Mode, unit, stage counter, input buffer, thresholds and last sample
pub static SHARED: SharedState = SharedState::new();

/// Keys accepted by the column tasks, dispatched by the scan loop
pub static KEY_CHANNEL: Channel<CriticalSectionRawMutex, Key, KEY_CHANNEL_SIZE> = Channel::new();

/// LED acknowledgement requests (flash length in ms)
pub static FLASH_CHANNEL: Channel<CriticalSectionRawMutex, u32, FLASH_CHANNEL_SIZE> =
    Channel::new();

/// Frame buffer mirrored to the LCD
pub static SCREEN: Mutex<CriticalSectionRawMutex, RefCell<Screen>> =
    Mutex::new(RefCell::new(Screen::new()));

/// Signal that the screen buffer changed
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Wakes the display task early (mode or unit changed)
pub static DISPLAY_WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Wakes the monitor task early (operator changed the mode)
///
/// The monitor still keeps the sensor's minimum read gap.
pub static MONITOR_WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Tell the display and monitor that the operator changed the mode or unit
pub fn notify_mode_change() {
    DISPLAY_WAKE.signal(());
    MONITOR_WAKE.signal(());
}
