//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod link;
pub mod tone;
pub mod uart_rx;

pub use link::link_task;
pub use tone::{tone_task, ToneConfig};
pub use uart_rx::uart_rx_task;
