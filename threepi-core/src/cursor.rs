//! Receive ring cursor
//!
//! Tracks how much of the transport's circular receive buffer has been
//! consumed. The buffer itself is never cleared.

use threepi_hal::RingSource;

/// Consumer-side read position into a receive ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RingCursor {
    position: usize,
    capacity: usize,
}

impl RingCursor {
    /// Cursor at index 0 of a ring with `capacity` slots
    pub const fn new(capacity: usize) -> Self {
        Self {
            position: 0,
            capacity,
        }
    }

    /// Cursor matching the capacity of `ring`
    pub fn for_ring<R: RingSource>(ring: &R) -> Self {
        Self::new(ring.capacity())
    }

    /// Index of the next unconsumed byte
    pub fn position(&self) -> usize {
        self.position
    }

    /// Ring capacity this cursor wraps at
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True if the producer has written past the cursor
    pub fn has_pending(&self, write_index: usize) -> bool {
        self.position != write_index
    }

    /// Read the byte under the cursor, then advance it with wraparound
    pub fn peek_and_advance<R: RingSource>(&mut self, ring: &R) -> u8 {
        let byte = ring.byte_at(self.position);
        self.position = if self.position + 1 == self.capacity {
            0
        } else {
            self.position + 1
        };
        byte
    }
}
