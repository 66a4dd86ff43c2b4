//! Argument collection state machine
//!
//! Decides whether the next received byte is a command or a drive argument.
//! The state is an explicit object owned by the link and passed by
//! reference; nothing here is global.

pub mod collector;
pub mod mode;

pub use collector::{Collected, Collector, DriveArguments};
pub use mode::{Mode, Phase};
