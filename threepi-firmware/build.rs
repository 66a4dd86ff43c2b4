//! Build script for threepi-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates link.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Longest boot message the firmware can hold
const MAX_BOOT_MESSAGE_LEN: usize = 16;

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

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate link.toml configuration at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=link.toml");

    let config_path = Path::new("link.toml");
    if !config_path.exists() {
        fail(
            "link.toml not found",
            &["The firmware embeds link.toml from the threepi-firmware directory."],
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read link.toml", &[&e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            let message = e.to_string();
            let lines: Vec<&str> = message.lines().collect();
            fail("Invalid TOML syntax in link.toml", &lines);
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_serial(&config, &mut errors);
    validate_link(&config, &mut errors);
    validate_hardening(&config, &mut errors);

    if !errors.is_empty() {
        let lines: Vec<&str> = errors.iter().map(String::as_str).collect();
        fail("Invalid link.toml configuration", &lines);
    }

    println!("cargo:warning=link.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[&str]) -> ! {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.len() > 62 {
                format!("{}...", &line[..59])
            } else {
                line.to_string()
            };
            format!("║  • {:<62} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<56} ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    );
}

/// Only the three known sections, each a table of known keys
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("top level must be a table".to_string());
        return;
    };

    for (name, section) in root {
        let known: &[&str] = match name.as_str() {
            "serial" => &["baud_rate"],
            "link" => &["fixed_speed", "boot_message"],
            "hardening" => &["argument_timeout_ms", "send_wait_limit"],
            _ => {
                errors.push(format!("unknown section [{}]", name));
                continue;
            }
        };
        let Some(table) = section.as_table() else {
            errors.push(format!("[{}] must be a table", name));
            continue;
        };
        for key in table.keys() {
            if !known.contains(&key.as_str()) {
                errors.push(format!("[{}] unknown key '{}'", name, key));
            }
        }
    }
}

fn integer(config: &toml::Value, section: &str, key: &str) -> Option<Result<i64, String>> {
    let value = config.get(section)?.get(key)?;
    Some(
        value
            .as_integer()
            .ok_or_else(|| format!("[{}] {} must be an integer", section, key)),
    )
}

fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) {
    match integer(config, "serial", "baud_rate") {
        Some(Ok(baud)) if baud <= 0 || baud > 921_600 => {
            errors.push("[serial] baud_rate must be 1-921600".to_string());
        }
        Some(Err(e)) => errors.push(e),
        _ => {}
    }
}

fn validate_link(config: &toml::Value, errors: &mut Vec<String>) {
    match integer(config, "link", "fixed_speed") {
        Some(Ok(speed)) if !(-255..=255).contains(&speed) => {
            errors.push("[link] fixed_speed must be -255 to 255".to_string());
        }
        Some(Err(e)) => errors.push(e),
        _ => {}
    }

    if let Some(message) = config.get("link").and_then(|l| l.get("boot_message")) {
        match message.as_str() {
            Some(text) if text.len() > MAX_BOOT_MESSAGE_LEN => errors.push(format!(
                "[link] boot_message longer than {} bytes",
                MAX_BOOT_MESSAGE_LEN
            )),
            Some(_) => {}
            None => errors.push("[link] boot_message must be a string".to_string()),
        }
    }
}

fn validate_hardening(config: &toml::Value, errors: &mut Vec<String>) {
    for key in ["argument_timeout_ms", "send_wait_limit"] {
        match integer(config, "hardening", key) {
            Some(Ok(value)) if value <= 0 || value > u32::MAX as i64 => {
                errors.push(format!("[hardening] {} must be 1-{}", key, u32::MAX));
            }
            Some(Err(e)) => errors.push(e),
            _ => {}
        }
    }
}
