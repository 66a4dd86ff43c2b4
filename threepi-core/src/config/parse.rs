//! Minimal TOML parser for the link configuration
//!
//! Handles only the subset `link.toml` uses. It does NOT support the full
//! TOML spec.
//!
//! Supported features:
//! - [section] headers: `serial`, `link`, `hardening`
//! - Key = value pairs (integer, quoted string)
//! - Comments (# ...), including trailing comments
//!
//! Keys that are absent keep their [`LinkConfig::default`] value. The
//! hardening extensions are off unless their key is present.

use heapless::String;

use super::types::{LinkConfig, MAX_BAUD_RATE, MAX_BOOT_MESSAGE_LEN, MAX_FIXED_SPEED};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Unknown or malformed section header
    InvalidSection,
    /// Line is neither a header nor `key = value`
    InvalidLine,
    /// Key not valid in its section
    UnknownKey,
    /// Value has the wrong type or is out of range
    InvalidValue,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Serial,
    Link,
    Hardening,
}

impl LinkConfig {
    /// Parse TOML text, see [`parse_config`]
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        parse_config(input)
    }
}

/// Parse TOML text into a [`LinkConfig`]
pub fn parse_config(input: &str) -> Result<LinkConfig, ConfigError> {
    let mut config = LinkConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = strip_comment(line).trim();

        // Skip empty lines and comments
        if line.is_empty() {
            continue;
        }

        if line.starts_with('[') && line.ends_with(']') {
            section = parse_section_header(&line[1..line.len() - 1])?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ConfigError::InvalidLine)?;
        apply_value(section, key, value, &mut config)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Result<Section, ConfigError> {
    match header.trim() {
        "serial" => Ok(Section::Serial),
        "link" => Ok(Section::Link),
        "hardening" => Ok(Section::Hardening),
        _ => Err(ConfigError::InvalidSection),
    }
}

/// Drop a `#` comment unless it sits inside a quoted string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
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

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ConfigError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ConfigError::InvalidValue)
    }
}

/// Parse an integer value, allowing `_` digit separators
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ConfigError> {
    let mut digits: String<24> = String::new();
    for c in value.chars().filter(|&c| c != '_') {
        digits.push(c).map_err(|_| ConfigError::InvalidValue)?;
    }
    digits.parse().map_err(|_| ConfigError::InvalidValue)
}

fn parse_int_in<T>(value: &str, min: T, max: T) -> Result<T, ConfigError>
where
    T: core::str::FromStr + PartialOrd,
{
    let parsed = parse_int(value)?;
    if parsed < min || parsed > max {
        return Err(ConfigError::InvalidValue);
    }
    Ok(parsed)
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut LinkConfig,
) -> Result<(), ConfigError> {
    match (section, key) {
        (Section::Serial, "baud_rate") => {
            config.baud_rate = parse_int_in(value, 1, MAX_BAUD_RATE)?;
        }
        (Section::Link, "fixed_speed") => {
            config.fixed_speed = parse_int_in(value, -MAX_FIXED_SPEED, MAX_FIXED_SPEED)?;
        }
        (Section::Link, "boot_message") => {
            let text = parse_string(value)?;
            let mut message: String<MAX_BOOT_MESSAGE_LEN> = String::new();
            message
                .push_str(text)
                .map_err(|_| ConfigError::InvalidValue)?;
            config.boot_message = message;
        }
        (Section::Hardening, "argument_timeout_ms") => {
            config.argument_timeout_ms = Some(parse_int_in(value, 1, u32::MAX)?);
        }
        (Section::Hardening, "send_wait_limit") => {
            config.send_wait_limit = Some(parse_int_in(value, 1, u32::MAX)?);
        }
        _ => return Err(ConfigError::UnknownKey),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_gives_defaults() {
        assert_eq!(LinkConfig::parse("").unwrap(), LinkConfig::default());
        assert_eq!(
            parse_config("# nothing here\n\n").unwrap(),
            LinkConfig::default()
        );
    }

    #[test]
    fn test_parse_full_config() {
        let config_str = r#"
# Serial line
[serial]
baud_rate = 115_200

[link]
fixed_speed = 80        # jog speed
boot_message = "Hi #1"

[hardening]
argument_timeout_ms = 500
send_wait_limit = 100000
"#;
        let config = parse_config(config_str).unwrap();
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.fixed_speed, 80);
        assert_eq!(config.boot_message.as_str(), "Hi #1");
        assert_eq!(config.argument_timeout_ms, Some(500));
        assert_eq!(config.send_wait_limit, Some(100_000));
        assert!(config.is_hardened());
    }

    #[test]
    fn test_parse_shipped_config() {
        let config = parse_config(include_str!("../../../threepi-firmware/link.toml")).unwrap();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.fixed_speed, 50);
        assert_eq!(config.boot_message.as_str(), "Howdy");
        assert!(!config.is_hardened());
    }

    #[test]
    fn test_unknown_section() {
        assert_eq!(
            parse_config("[motors]\nspeed = 1"),
            Err(ConfigError::InvalidSection)
        );
    }

    #[test]
    fn test_key_in_wrong_section() {
        assert_eq!(
            parse_config("[link]\nbaud_rate = 9600"),
            Err(ConfigError::UnknownKey)
        );
        assert_eq!(parse_config("fixed_speed = 1"), Err(ConfigError::UnknownKey));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            parse_config("[serial]\nbaud_rate = 0"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[serial]\nbaud_rate = fast"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[serial]\nbaud_rate = 1_000_000"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[link]\nfixed_speed = 40000"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[link]\nfixed_speed = 256"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[link]\nfixed_speed = -256"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[hardening]\nargument_timeout_ms = 0"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[hardening]\nsend_wait_limit = 0"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[link]\nboot_message = Howdy"),
            Err(ConfigError::InvalidValue)
        );
        assert_eq!(
            parse_config("[link]\nboot_message = \"this is far too long\""),
            Err(ConfigError::InvalidValue)
        );
    }

    #[test]
    fn test_range_limits_accepted() {
        let config = parse_config(
            "[serial]\nbaud_rate = 921_600\n[link]\nfixed_speed = -255\n\
             [hardening]\nargument_timeout_ms = 1\nsend_wait_limit = 4294967295",
        )
        .unwrap();
        assert_eq!(config.baud_rate, MAX_BAUD_RATE);
        assert_eq!(config.fixed_speed, -MAX_FIXED_SPEED);
        assert_eq!(config.argument_timeout_ms, Some(1));
        assert_eq!(config.send_wait_limit, Some(u32::MAX));
    }

    #[test]
    fn test_malformed_line() {
        assert_eq!(
            parse_config("[link]\nfixed_speed"),
            Err(ConfigError::InvalidLine)
        );
        assert_eq!(
            parse_config("[link]\nfixed_speed ="),
            Err(ConfigError::InvalidLine)
        );
    }

    #[test]
    fn test_strip_comment_respects_quotes() {
        assert_eq!(strip_comment("a = 1 # note"), "a = 1 ");
        assert_eq!(strip_comment("a = \"#x\" # note"), "a = \"#x\" ");
        assert_eq!(strip_comment("# whole line"), "");
    }
}
