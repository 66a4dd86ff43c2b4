//! Interrupt-safe receive ring
//!
//! A fixed-capacity circular byte buffer with a single producer (the UART
//! receive interrupt or task) and a single consumer (the link). The producer
//! appends and advances its write index; nothing is ever removed. Consumers
//! track their own read position.
//!
//! If the producer laps a consumer, the consumer silently reads newer bytes
//! in place of the ones it missed. That is data loss, not a memory hazard:
//! every slot is an atomic cell.

use portable_atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::uart::RingSource;

/// Capacity used by the robot's serial receive path
pub const DEFAULT_RING_CAPACITY: usize = 32;

/// Single-producer/single-consumer receive ring of `N` bytes
///
/// Can live in a `static`; all methods take `&self`.
pub struct ReceiveRing<const N: usize> {
    slots: [AtomicU8; N],
    write: AtomicUsize,
}

impl<const N: usize> Default for ReceiveRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ReceiveRing<N> {
    /// Create an empty ring with every slot zeroed
    pub const fn new() -> Self {
        Self {
            slots: [const { AtomicU8::new(0) }; N],
            write: AtomicUsize::new(0),
        }
    }

    /// Append a byte (producer side)
    ///
    /// Overwrites the oldest slot once the ring has wrapped.
    pub fn push(&self, byte: u8) {
        let index = self.write.load(Ordering::Relaxed);
        self.slots[index].store(byte, Ordering::Relaxed);
        let next = if index + 1 == N { 0 } else { index + 1 };
        self.write.store(next, Ordering::Release);
    }

    /// Append every byte of `bytes` in order (producer side)
    pub fn push_slice(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }
}

impl<const N: usize> RingSource for ReceiveRing<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn write_index(&self) -> usize {
        self.write.load(Ordering::Acquire)
    }

    fn byte_at(&self, index: usize) -> u8 {
        self.slots[index].load(Ordering::Relaxed)
    }
}

impl<T: RingSource + ?Sized> RingSource for &T {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn write_index(&self) -> usize {
        (**self).write_index()
    }

    fn byte_at(&self, index: usize) -> u8 {
        (**self).byte_at(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_ring_is_empty() {
        let ring: ReceiveRing<DEFAULT_RING_CAPACITY> = ReceiveRing::new();
        assert_eq!(ring.capacity(), 32);
        assert_eq!(ring.write_index(), 0);
        assert_eq!(ring.byte_at(0), 0);
    }

    #[test]
    fn test_push_advances_write_index() {
        let ring: ReceiveRing<4> = ReceiveRing::new();
        ring.push_slice(b"ab");
        assert_eq!(ring.write_index(), 2);
        assert_eq!(ring.byte_at(0), b'a');
        assert_eq!(ring.byte_at(1), b'b');
    }

    #[test]
    fn test_write_index_wraps() {
        let ring: ReceiveRing<4> = ReceiveRing::new();
        ring.push_slice(b"abcd");
        assert_eq!(ring.write_index(), 0);
        ring.push(b'e');
        assert_eq!(ring.write_index(), 1);
        // Oldest slot overwritten
        assert_eq!(ring.byte_at(0), b'e');
        assert_eq!(ring.byte_at(3), b'd');
    }

    #[test]
    fn test_static_ring() {
        static RING: ReceiveRing<8> = ReceiveRing::new();
        RING.push(0x42);
        let source: &dyn RingSource = &&RING;
        assert_eq!(source.byte_at(0), 0x42);
        assert_eq!(source.write_index(), 1);
    }

    proptest! {
        #[test]
        fn prop_write_index_is_count_mod_capacity(bytes in proptest::collection::vec(any::<u8>(), 0..200)) {
            let ring: ReceiveRing<32> = ReceiveRing::new();
            ring.push_slice(&bytes);
            prop_assert_eq!(ring.write_index(), bytes.len() % 32);
            if let Some(&last) = bytes.last() {
                let last_index = (bytes.len() - 1) % 32;
                prop_assert_eq!(ring.byte_at(last_index), last);
            }
        }
    }
}
