//! Board-agnostic core of the threepi serial link
//!
//! This crate contains all link logic that does not depend on a specific
//! board:
//!
//! - Device traits (motors, display, tone player, battery sense)
//! - Receive ring cursor
//! - Mode and argument collection state machine
//! - Command dispatcher
//! - Response writer (wait-for-idle-before-write)
//! - The link main loop
//! - Configuration types and parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod link;
pub mod state;
pub mod traits;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use config::LinkConfig;
pub use cursor::RingCursor;
pub use error::LinkError;
pub use link::{Devices, Link, LinkEvent};
pub use state::{Collector, Mode, Phase};
pub use writer::ResponseWriter;
