//! Device configuration type definitions
//!
//! Timing for every execution context. Parsed from `device.toml` at boot,
//! falling back to [`DeviceConfig::default`].

/// Longest timeout the RP2040 watchdog counter can hold (ms)
pub const MAX_WATCHDOG_TIMEOUT_MS: u32 = 8_388;

/// Keypad scan loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeypadConfig {
    /// Time each row stays energized (ms)
    pub scan_period_ms: u32,
    /// Refractory window after an accepted key edge (ms)
    pub debounce_ms: u32,
    /// LED acknowledgement length per key press (ms)
    pub flash_ms: u32,
}

impl Default for KeypadConfig {
    fn default() -> Self {
        Self {
            scan_period_ms: 5,
            debounce_ms: 250,
            flash_ms: 250,
        }
    }
}

/// Sampling and alert cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Sample period while monitoring (ms)
    pub sample_interval_ms: u32,
    /// Sample period while idle or configuring (ms)
    pub idle_sample_interval_ms: u32,
    /// Buzzer/LED on-time per alert cycle (ms)
    pub alert_on_ms: u32,
    /// Buzzer/LED off-time per alert cycle (ms)
    pub alert_off_ms: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 1000,
            idle_sample_interval_ms: 2000,
            alert_on_ms: 1000,
            alert_off_ms: 1000,
        }
    }
}

/// Display context timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Live climate refresh period (ms)
    pub refresh_ms: u32,
    /// How long a rejected-input message stays up (ms)
    pub error_hold_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_ms: 1000,
            error_hold_ms: 3000,
        }
    }
}

/// Watchdog supervision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchdogConfig {
    /// Reset if the scan loop has not fed the watchdog for this long (ms)
    pub timeout_ms: u32,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

/// Configuration problems found by [`DeviceConfig::check`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A period or duration is zero
    ZeroDuration,
    /// Watchdog would fire between two scan iterations
    WatchdogTooShort,
    /// Watchdog timeout exceeds the hardware counter
    WatchdogTooLong,
}

/// Complete device configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub keypad: KeypadConfig,
    pub monitor: MonitorConfig,
    pub display: DisplayConfig,
    pub watchdog: WatchdogConfig,
}

impl DeviceConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that the timing is usable
    pub fn check(&self) -> Result<(), ConfigError> {
        let durations = [
            self.keypad.scan_period_ms,
            self.keypad.debounce_ms,
            self.keypad.flash_ms,
            self.monitor.sample_interval_ms,
            self.monitor.idle_sample_interval_ms,
            self.monitor.alert_on_ms,
            self.monitor.alert_off_ms,
            self.display.refresh_ms,
            self.display.error_hold_ms,
            self.watchdog.timeout_ms,
        ];
        if durations.contains(&0) {
            return Err(ConfigError::ZeroDuration);
        }

        if self.watchdog.timeout_ms <= self.keypad.scan_period_ms {
            return Err(ConfigError::WatchdogTooShort);
        }

        if self.watchdog.timeout_ms > MAX_WATCHDOG_TIMEOUT_MS {
            return Err(ConfigError::WatchdogTooLong);
        }

        Ok(())
    }
}
