//! Simple TOML parser for device configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `device.toml`. It does NOT support the full TOML grammar and needs no
//! allocator.
//!
//! Supported features:
//! - [section] headers
//! - key = integer pairs (underscores allowed as digit separators)
//! - Comments (# ...), including trailing comments
//!
//! NOT supported:
//! - Strings, floats, booleans, arrays, inline tables
//! - Dotted keys or nested sections

use super::types::{ConfigError, DeviceConfig};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Section header names no known section
    InvalidSection {
        line: usize,
    },
    /// Key is not defined for its section
    UnknownKey {
        line: usize,
    },
    /// Line is neither a header nor a key = value pair
    Malformed {
        line: usize,
    },
    /// Value is not a non-negative integer
    InvalidValue {
        line: usize,
    },
    /// File parsed but the resulting timing is unusable
    Invalid(ConfigError),
}

impl From<ConfigError> for ParseError {
    fn from(e: ConfigError) -> Self {
        ParseError::Invalid(e)
    }
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Keypad,
    Monitor,
    Display,
    Watchdog,
}

/// Parse TOML text into a DeviceConfig
///
/// Keys that are absent keep their default value.
pub fn parse_device_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::new();
    let mut section = Section::Root;

    for (index, raw) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        // Check for section header
        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])
                .ok_or(ParseError::InvalidSection { line: line_no })?;
            continue;
        }

        let (key, value) =
            parse_key_value(line).ok_or(ParseError::Malformed { line: line_no })?;
        let value = parse_int(value).ok_or(ParseError::InvalidValue { line: line_no })?;

        let slot = field(&mut config, section, key).ok_or(ParseError::UnknownKey { line: line_no })?;
        *slot = value;
    }

    config.check()?;
    Ok(config)
}

/// Parse section header like "keypad" or "watchdog"
fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "keypad" => Some(Section::Keypad),
        "monitor" => Some(Section::Monitor),
        "display" => Some(Section::Display),
        "watchdog" => Some(Section::Watchdog),
        _ => None,
    }
}

/// Map a section/key pair to the config field it sets
fn field<'a>(config: &'a mut DeviceConfig, section: Section, key: &str) -> Option<&'a mut u32> {
    let slot = match (section, key) {
        (Section::Keypad, "scan_period_ms") => &mut config.keypad.scan_period_ms,
        (Section::Keypad, "debounce_ms") => &mut config.keypad.debounce_ms,
        (Section::Keypad, "flash_ms") => &mut config.keypad.flash_ms,
        (Section::Monitor, "sample_interval_ms") => &mut config.monitor.sample_interval_ms,
        (Section::Monitor, "idle_sample_interval_ms") => {
            &mut config.monitor.idle_sample_interval_ms
        }
        (Section::Monitor, "alert_on_ms") => &mut config.monitor.alert_on_ms,
        (Section::Monitor, "alert_off_ms") => &mut config.monitor.alert_off_ms,
        (Section::Display, "refresh_ms") => &mut config.display.refresh_ms,
        (Section::Display, "error_hold_ms") => &mut config.display.error_hold_ms,
        (Section::Watchdog, "timeout_ms") => &mut config.watchdog.timeout_ms,
        _ => return None,
    };
    Some(slot)
}

/// Drop everything from the first `#`
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = line[eq_pos + 1..].trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse an integer value, allowing `_` separators
fn parse_int(value: &str) -> Option<u32> {
    let mut acc: u32 = 0;
    let mut digits = 0;

    for ch in value.chars() {
        match ch {
            '_' if digits > 0 => continue,
            '0'..='9' => {
                acc = acc.checked_mul(10)?.checked_add(ch as u32 - '0' as u32)?;
                digits += 1;
            }
            _ => return None,
        }
    }

    if digits == 0 {
        None
    } else {
        Some(acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("1000"), Some(1000));
        assert_eq!(parse_int("5_000"), Some(5000));
        assert_eq!(parse_int("_5"), None);
        assert_eq!(parse_int("-5"), None);
        assert_eq!(parse_int("1.5"), None);
        assert_eq!(parse_int("\"5\""), None);
        assert_eq!(parse_int("99999999999"), None);
    }

    #[test]
    fn test_parse_section_header() {
        assert_eq!(parse_section_header("keypad"), Some(Section::Keypad));
        assert_eq!(parse_section_header(" watchdog "), Some(Section::Watchdog));
        assert_eq!(parse_section_header("stepper"), None);
    }

    #[test]
    fn test_empty_input_gives_defaults() {
        let config = parse_device_config("").unwrap();
        assert_eq!(config, DeviceConfig::default());
    }

    #[test]
    fn test_parse_full_config() {
        let input = r#"
# Hygrostat timing
[keypad]
scan_period_ms = 2
debounce_ms = 300   # mechanical keypad
flash_ms = 100

[monitor]
sample_interval_ms = 1_500
idle_sample_interval_ms = 3000
alert_on_ms = 500
alert_off_ms = 1500

[display]
refresh_ms = 750
error_hold_ms = 2000

[watchdog]
timeout_ms = 4000
"#;

        let config = parse_device_config(input).unwrap();
        assert_eq!(config.keypad.scan_period_ms, 2);
        assert_eq!(config.keypad.debounce_ms, 300);
        assert_eq!(config.keypad.flash_ms, 100);
        assert_eq!(config.monitor.sample_interval_ms, 1500);
        assert_eq!(config.monitor.idle_sample_interval_ms, 3000);
        assert_eq!(config.monitor.alert_on_ms, 500);
        assert_eq!(config.monitor.alert_off_ms, 1500);
        assert_eq!(config.display.refresh_ms, 750);
        assert_eq!(config.display.error_hold_ms, 2000);
        assert_eq!(config.watchdog.timeout_ms, 4000);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse_device_config("[watchdog]\ntimeout_ms = 3000\n").unwrap();
        assert_eq!(config.watchdog.timeout_ms, 3000);
        assert_eq!(config.keypad, DeviceConfig::default().keypad);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            parse_device_config("[keypad]\n[bogus]\n"),
            Err(ParseError::InvalidSection { line: 2 })
        );
        assert_eq!(
            parse_device_config("[keypad]\nrows = 4\n"),
            Err(ParseError::UnknownKey { line: 2 })
        );
        assert_eq!(
            parse_device_config("[keypad]\ndebounce_ms = fast\n"),
            Err(ParseError::InvalidValue { line: 2 })
        );
        assert_eq!(
            parse_device_config("[keypad]\ndebounce_ms\n"),
            Err(ParseError::Malformed { line: 2 })
        );
    }

    #[test]
    fn test_key_outside_section_rejected() {
        assert_eq!(
            parse_device_config("timeout_ms = 3000\n"),
            Err(ParseError::UnknownKey { line: 1 })
        );
    }

    #[test]
    fn test_unusable_timing_rejected() {
        assert_eq!(
            parse_device_config("[watchdog]\ntimeout_ms = 10000\n"),
            Err(ParseError::Invalid(ConfigError::WatchdogTooLong))
        );
    }
}
