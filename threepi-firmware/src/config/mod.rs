//! Configuration loading
//!
//! The link configuration is compiled in from `link.toml` and parsed at
//! boot by the no_std parser in threepi-core.

use defmt::*;
use threepi_core::config::parse_config;
use threepi_core::LinkConfig;

/// Embedded configuration (compiled into firmware)
/// Edit link.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../link.toml");

/// Parse the embedded configuration, falling back to defaults
pub fn load() -> LinkConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: {} baud, jog speed {}, hardened={}",
                config.baud_rate,
                config.fixed_speed,
                config.is_hardened()
            );
            config
        }
        Err(e) => {
            error!("Invalid link.toml ({:?}), using defaults", e);
            LinkConfig::default()
        }
    }
}
