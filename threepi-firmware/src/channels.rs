//! Inter-task communication
//!
//! The receive ring is the only state shared between the UART task and the
//! link task. It needs no lock: the UART task is the single writer and the
//! link keeps its own read cursor.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use threepi_drivers::tone::Note;
use threepi_hal::ReceiveRing;

/// Receive ring capacity
pub const RX_RING_CAPACITY: usize = 32;

/// Notes queued for the buzzer
const TONE_QUEUE_SIZE: usize = 4;

/// Bytes received from the serial line
pub static RX_RING: ReceiveRing<RX_RING_CAPACITY> = ReceiveRing::new();

/// Notes for the tone task; the link never waits on it
pub static TONE_QUEUE: Channel<CriticalSectionRawMutex, Note, TONE_QUEUE_SIZE> = Channel::new();
