//! Link configuration
//!
//! Configuration is written as a small TOML file (`link.toml`) that the
//! firmware embeds at build time and parses at boot with [`parse_config`].

pub mod parse;
pub mod types;

pub use parse::{parse_config, ConfigError};
pub use types::{LinkConfig, MAX_BAUD_RATE, MAX_BOOT_MESSAGE_LEN, MAX_FIXED_SPEED};
