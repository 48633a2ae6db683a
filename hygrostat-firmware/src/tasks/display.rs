//! Display task
//!
//! Drives the configuration sequencer and, outside configuration, the
//! live climate readout. Breach messages are rendered by the monitor task.

use defmt::*;
use embassy_futures::select::select;
use embassy_time::{Duration, Timer};

use hygrostat_core::config::DisplayConfig;
use hygrostat_core::display::render_climate;
use hygrostat_core::sequencer::{ConfigSequencer, SequencerStatus};

use crate::channels::{notify_mode_change, DISPLAY_WAKE, SHARED};
use crate::screen::update_screen;

/// Input buffer poll period while waiting for keystrokes (ms)
const INPUT_POLL_MS: u64 = 10;

/// Display task - threshold entry and live readout
#[embassy_executor::task]
pub async fn display_task(config: DisplayConfig) {
    info!("Display task started");

    let mut sequencer = ConfigSequencer::new();
    let refresh = Duration::from_millis(config.refresh_ms as u64);
    let error_hold = Duration::from_millis(config.error_hold_ms as u64);

    loop {
        let status = update_screen(|screen| sequencer.poll(&SHARED, screen));

        match status {
            SequencerStatus::Inactive | SequencerStatus::Abandoned => {
                if status == SequencerStatus::Abandoned {
                    info!("Configuration abandoned");
                }

                if SHARED.mode().shows_live_climate() {
                    update_screen(|screen| render_climate(screen, SHARED.sample(), SHARED.unit()));
                }
                select(Timer::after(refresh), DISPLAY_WAKE.wait()).await;
            }
            SequencerStatus::Waiting => {
                Timer::after_millis(INPUT_POLL_MS).await;
            }
            SequencerStatus::Started => info!("Configuration started"),
            SequencerStatus::Redrawn => {}
            SequencerStatus::Accepted { stage, value } => {
                info!("{} accepted: {}", stage, value);
            }
            SequencerStatus::Committed(set) => {
                info!("Thresholds committed: {}", set);
                notify_mode_change();
            }
            SequencerStatus::Rejected(e) => {
                warn!("Thresholds rejected: {}", e);
                // Message stays up, then entry restarts from the first stage
                Timer::after(error_hold).await;
            }
        }
    }
}
