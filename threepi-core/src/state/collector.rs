//! Two-slot argument collector
//!
//! After a drive command the next two bytes are signed speed magnitudes,
//! left motor first. The collector stores them and hands back a complete
//! [`DriveArguments`] once slot 1 is filled.
//!
//! There is no timeout here: a collection that only ever receives one byte
//! stays in [`Phase::AwaitingSlot1`] until something calls
//! [`Collector::abandon`].

use threepi_protocol::{DriveDirection, DRIVE_ARGUMENT_COUNT};

use super::mode::{Mode, Phase};

/// Offset counter value while not collecting
pub const IDLE_OFFSET: i8 = -1;

/// Both speed arguments of a completed drive command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveArguments {
    /// Direction chosen by the drive command
    pub direction: DriveDirection,
    /// Raw received values, left then right
    pub slots: [i8; DRIVE_ARGUMENT_COUNT],
}

impl DriveArguments {
    /// Left motor speed with the direction sign applied
    pub fn left_speed(&self) -> i16 {
        self.direction.apply(self.slots[0])
    }

    /// Right motor speed with the direction sign applied
    pub fn right_speed(&self) -> i16 {
        self.direction.apply(self.slots[1])
    }
}

/// Result of feeding one byte to the collector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Collected {
    /// Stored in a slot; more bytes needed
    Stored { slot: u8, value: i8 },
    /// Second slot filled; mode is back to idle
    Complete(DriveArguments),
    /// The offset counter was out of range; mode forced back to idle
    Inconsistent,
}

/// Mode flag plus argument slots
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Collector {
    mode: Mode,
    slots: [i8; DRIVE_ARGUMENT_COUNT],
    /// -1 idle, 0 awaiting slot 0, 1 awaiting slot 1
    offset: i8,
    /// Time of the drive command or the last stored argument
    last_byte_at_ms: u64,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    /// Idle collector with empty slots
    pub const fn new() -> Self {
        Self {
            mode: Mode::Idle,
            slots: [0; DRIVE_ARGUMENT_COUNT],
            offset: IDLE_OFFSET,
            last_byte_at_ms: 0,
        }
    }

    /// Current mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current phase of the collection cycle
    pub fn phase(&self) -> Phase {
        match (self.mode.is_collecting(), self.offset) {
            (false, _) => Phase::Idle,
            (true, 0) => Phase::AwaitingSlot0,
            (true, _) => Phase::AwaitingSlot1,
        }
    }

    /// Raw offset counter
    pub fn offset(&self) -> i8 {
        self.offset
    }

    /// Slot contents of the current cycle
    pub fn slots(&self) -> [i8; DRIVE_ARGUMENT_COUNT] {
        self.slots
    }

    /// Start collecting arguments for a drive in `direction`
    ///
    /// Restarts from slot 0 if a collection was already under way.
    pub fn begin(&mut self, direction: DriveDirection, now_ms: u64) {
        self.mode = Mode::collecting(direction);
        self.slots = [0; DRIVE_ARGUMENT_COUNT];
        self.offset = 0;
        self.last_byte_at_ms = now_ms;
    }

    /// Feed one received byte, interpreted as a signed magnitude
    pub fn accept(&mut self, byte: u8, now_ms: u64) -> Collected {
        let Some(direction) = self.mode.direction() else {
            return Collected::Inconsistent;
        };
        let value = byte as i8;

        match self.offset {
            0 => {
                self.slots[0] = value;
                self.offset = 1;
                self.last_byte_at_ms = now_ms;
                Collected::Stored { slot: 0, value }
            }
            1 => {
                self.slots[1] = value;
                let arguments = DriveArguments {
                    direction,
                    slots: self.slots,
                };
                self.abandon();
                Collected::Complete(arguments)
            }
            _ => {
                self.abandon();
                Collected::Inconsistent
            }
        }
    }

    /// Drop any collection in progress and return to idle
    pub fn abandon(&mut self) {
        self.mode = Mode::Idle;
        self.offset = IDLE_OFFSET;
    }

    /// True if collecting and no byte arrived for more than `timeout_ms`
    pub fn is_stale(&self, now_ms: u64, timeout_ms: u32) -> bool {
        self.mode.is_collecting() && now_ms.saturating_sub(self.last_byte_at_ms) > timeout_ms as u64
    }

    #[cfg(test)]
    pub(crate) fn force_offset(&mut self, offset: i8) {
        self.offset = offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_starts_idle() {
        let collector = Collector::new();
        assert_eq!(collector.mode(), Mode::Idle);
        assert_eq!(collector.phase(), Phase::Idle);
        assert_eq!(collector.offset(), IDLE_OFFSET);
    }

    #[test]
    fn test_forward_cycle() {
        let mut collector = Collector::new();
        collector.begin(DriveDirection::Forward, 0);
        assert_eq!(collector.mode(), Mode::CollectingForward);
        assert_eq!(collector.phase(), Phase::AwaitingSlot0);

        assert_eq!(
            collector.accept(10, 0),
            Collected::Stored { slot: 0, value: 10 }
        );
        assert_eq!(collector.phase(), Phase::AwaitingSlot1);

        let Collected::Complete(arguments) = collector.accept(20, 0) else {
            panic!("expected a complete drive");
        };
        assert_eq!(arguments.slots, [10, 20]);
        assert_eq!((arguments.left_speed(), arguments.right_speed()), (10, 20));
        assert_eq!(collector.mode(), Mode::Idle);
        assert_eq!(collector.phase(), Phase::Idle);
    }

    #[test]
    fn test_backward_negates() {
        let mut collector = Collector::new();
        collector.begin(DriveDirection::Backward, 0);
        collector.accept(10, 0);
        let Collected::Complete(arguments) = collector.accept(20, 0) else {
            panic!("expected a complete drive");
        };
        assert_eq!(arguments.slots, [10, 20]);
        assert_eq!((arguments.left_speed(), arguments.right_speed()), (-10, -20));
    }

    #[test]
    fn test_high_bytes_are_negative() {
        let mut collector = Collector::new();
        collector.begin(DriveDirection::Backward, 0);
        collector.accept(0x80, 0);
        let Collected::Complete(arguments) = collector.accept(200, 0) else {
            panic!("expected a complete drive");
        };
        assert_eq!(arguments.slots, [-128, -56]);
        assert_eq!((arguments.left_speed(), arguments.right_speed()), (128, 56));
    }

    #[test]
    fn test_one_argument_stays_in_slot1() {
        let mut collector = Collector::new();
        collector.begin(DriveDirection::Forward, 0);
        collector.accept(10, 0);

        // No timeout in the collector itself
        assert_eq!(collector.phase(), Phase::AwaitingSlot1);
        assert_eq!(collector.mode(), Mode::CollectingForward);
        assert_eq!(collector.slots(), [10, 0]);
    }

    #[test]
    fn test_offset_overrun_resets() {
        let mut collector = Collector::new();
        collector.begin(DriveDirection::Forward, 0);
        collector.force_offset(2);

        assert_eq!(collector.accept(10, 0), Collected::Inconsistent);
        assert_eq!(collector.mode(), Mode::Idle);
        assert_eq!(collector.offset(), IDLE_OFFSET);
    }

    #[test]
    fn test_accept_while_idle_is_inconsistent() {
        let mut collector = Collector::new();
        assert_eq!(collector.accept(1, 0), Collected::Inconsistent);
        assert_eq!(collector.mode(), Mode::Idle);
    }

    #[test]
    fn test_begin_restarts_cycle() {
        let mut collector = Collector::new();
        collector.begin(DriveDirection::Forward, 0);
        collector.accept(10, 0);
        collector.begin(DriveDirection::Backward, 0);
        assert_eq!(collector.phase(), Phase::AwaitingSlot0);
        assert_eq!(collector.slots(), [0, 0]);
    }

    #[test]
    fn test_staleness_tracks_last_byte() {
        let mut collector = Collector::new();
        assert!(!collector.is_stale(10_000, 100));

        collector.begin(DriveDirection::Forward, 1_000);
        assert!(!collector.is_stale(1_100, 100));
        assert!(collector.is_stale(1_101, 100));

        collector.accept(5, 1_050);
        assert!(!collector.is_stale(1_150, 100));
        assert!(collector.is_stale(1_151, 100));
    }

    proptest! {
        #[test]
        fn prop_every_pair_completes(left in any::<u8>(), right in any::<u8>(), backward in any::<bool>()) {
            let direction = if backward { DriveDirection::Backward } else { DriveDirection::Forward };
            let mut collector = Collector::new();
            collector.begin(direction, 0);
            collector.accept(left, 0);
            let outcome = collector.accept(right, 0);
            let Collected::Complete(arguments) = outcome else {
                return Err(TestCaseError::fail("drive did not complete"));
            };
            let sign: i16 = if backward { -1 } else { 1 };
            prop_assert_eq!(arguments.left_speed(), sign * (left as i8) as i16);
            prop_assert_eq!(arguments.right_speed(), sign * (right as i8) as i16);
            prop_assert_eq!(collector.mode(), Mode::Idle);
        }
    }
}
