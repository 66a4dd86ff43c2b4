//! threepi Serial Command Protocol
//!
//! This crate defines the byte-level protocol spoken between a host (for
//! example a Bluefruit UART bridge) and the robot. There is no framing:
//! every received byte is either a command or, right after a drive command,
//! one of two positional speed arguments.
//!
//! # Wire Format
//!
//! ```text
//!  host → robot          robot → host
//!  ────────────          ────────────
//!  'g'                   "3pi"                  (3 bytes)
//!  'b'                   millivolts, LE         (2 bytes)
//!  'v' L R  /  'u' L R   -                      (L, R signed bytes)
//!  other X               X ^ 0x20               (1 byte)
//!  (button press)        "Hi there!\r\n"        (11 bytes)
//! ```
//!
//! The remaining commands (`c d r p s w x y z`) act on the robot and send
//! nothing back.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod response;

pub use command::{Command, DriveDirection, MotorSide, DRIVE_ARGUMENT_COUNT};
pub use response::{case_flip, Response, CASE_FLIP_MASK, GREETING, MAX_RESPONSE_LEN, SIGNATURE};
