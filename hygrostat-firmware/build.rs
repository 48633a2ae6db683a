//! Build script for hygrostat-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Passes the cortex-m-rt and defmt linker scripts
//! - Validates device.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Known keys per section
const SECTIONS: &[(&str, &[&str])] = &[
    ("keypad", &["scan_period_ms", "debounce_ms", "flash_ms"]),
    (
        "monitor",
        &[
            "sample_interval_ms",
            "idle_sample_interval_ms",
            "alert_on_ms",
            "alert_off_ms",
        ],
    ),
    ("display", &["refresh_ms", "error_hold_ms"]),
    ("watchdog", &["timeout_ms"]),
];

/// Longest timeout the RP2040 watchdog counter can hold (ms)
const MAX_WATCHDOG_TIMEOUT_MS: i64 = 8_388;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    // Linker scripts for the firmware binary only
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate device.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=device.toml");

    let config_path = Path::new("device.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: device.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds a device.toml configuration file.           ║\n\
            ║  Please create one in the hygrostat-firmware directory.          ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read device.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in device.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_watchdog(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid device configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=device.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every section and key must be known, and every value a positive integer
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, section) in root {
        let Some(keys) = SECTIONS
            .iter()
            .find(|(known, _)| known == name)
            .map(|(_, keys)| *keys)
        else {
            errors.push(format!("unknown section [{}]", name));
            continue;
        };

        let section = match section {
            toml::Value::Table(t) => t,
            _ => {
                errors.push(format!("[{}] must be a table", name));
                continue;
            }
        };

        for (key, value) in section {
            if !keys.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
                continue;
            }
            match value {
                toml::Value::Integer(ms) if *ms > 0 && *ms <= u32::MAX as i64 => {}
                toml::Value::Integer(_) => {
                    errors.push(format!("[{}] {} must be a positive duration", name, key));
                }
                _ => errors.push(format!("[{}] {} must be an integer", name, key)),
            }
        }
    }
}

/// The watchdog must outlast a scan period and fit the hardware counter
fn validate_watchdog(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(timeout) = config
        .get("watchdog")
        .and_then(|w| w.get("timeout_ms"))
        .and_then(|t| t.as_integer())
    else {
        return;
    };

    if timeout > MAX_WATCHDOG_TIMEOUT_MS {
        errors.push(format!(
            "[watchdog] timeout_ms must be at most {}",
            MAX_WATCHDOG_TIMEOUT_MS
        ));
    }

    let scan_period = config
        .get("keypad")
        .and_then(|k| k.get("scan_period_ms"))
        .and_then(|s| s.as_integer())
        .unwrap_or(5);
    if timeout <= scan_period {
        errors.push("[watchdog] timeout_ms must exceed keypad scan_period_ms".to_string());
    }
}
