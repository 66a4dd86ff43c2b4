//! Receive modes

use threepi_protocol::DriveDirection;

/// How the next received byte is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Bytes are single-byte commands
    #[default]
    Idle,
    /// Bytes are speed arguments for a forward drive
    CollectingForward,
    /// Bytes are speed arguments for a backward drive
    CollectingBackward,
}

impl Mode {
    /// Collecting mode for a drive direction
    pub fn collecting(direction: DriveDirection) -> Self {
        match direction {
            DriveDirection::Forward => Mode::CollectingForward,
            DriveDirection::Backward => Mode::CollectingBackward,
        }
    }

    /// Direction being collected for, if any
    pub fn direction(&self) -> Option<DriveDirection> {
        match self {
            Mode::Idle => None,
            Mode::CollectingForward => Some(DriveDirection::Forward),
            Mode::CollectingBackward => Some(DriveDirection::Backward),
        }
    }

    /// Check if bytes are currently routed to the argument collector
    pub fn is_collecting(&self) -> bool {
        !matches!(self, Mode::Idle)
    }
}

/// Position within one argument collection cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Not collecting
    Idle,
    /// Next byte goes to slot 0 (left motor)
    AwaitingSlot0,
    /// Next byte goes to slot 1 (right motor)
    AwaitingSlot1,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_roundtrip() {
        for direction in [DriveDirection::Forward, DriveDirection::Backward] {
            let mode = Mode::collecting(direction);
            assert!(mode.is_collecting());
            assert_eq!(mode.direction(), Some(direction));
        }
    }

    #[test]
    fn test_idle_has_no_direction() {
        assert_eq!(Mode::default(), Mode::Idle);
        assert!(!Mode::Idle.is_collecting());
        assert_eq!(Mode::Idle.direction(), None);
    }
}
