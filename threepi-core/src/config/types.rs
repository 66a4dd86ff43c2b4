//! Configuration type definitions

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum boot message length (one display line plus margin)
pub const MAX_BOOT_MESSAGE_LEN: usize = 16;

/// Highest baud rate the UART accepts
pub const MAX_BAUD_RATE: u32 = 921_600;

/// Largest jog speed magnitude the motor driver can express
pub const MAX_FIXED_SPEED: i16 = 255;

/// Link configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LinkConfig {
    /// Serial line speed in bits per second
    pub baud_rate: u32,
    /// Speed used by the single-motor jog commands
    pub fixed_speed: i16,
    /// Text shown on the display at startup
    pub boot_message: String<MAX_BOOT_MESSAGE_LEN>,
    /// Abandon a drive whose arguments stop arriving for this long (extension)
    pub argument_timeout_ms: Option<u32>,
    /// Give up on a busy transmitter after this many polls (extension)
    pub send_wait_limit: Option<u32>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        let mut boot_message = String::new();
        let _ = boot_message.push_str("Howdy");
        Self {
            baud_rate: 9600,
            fixed_speed: 50,
            boot_message,
            argument_timeout_ms: None,
            send_wait_limit: None,
        }
    }
}

impl LinkConfig {
    /// Check if either hardening extension is enabled
    pub fn is_hardened(&self) -> bool {
        self.argument_timeout_ms.is_some() || self.send_wait_limit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_device() {
        let config = LinkConfig::default();
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.fixed_speed, 50);
        assert_eq!(config.boot_message.as_str(), "Howdy");
        assert!(!config.is_hardened());
    }
}
