//! threepi Hardware Abstraction Layer
//!
//! This crate defines the traits the serial link needs from the board it
//! runs on. Board crates implement them for real peripherals; host tests
//! implement them with recording mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  threepi-firmware (embassy, RP2040)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  threepi-core (link, dispatcher, ...)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  threepi-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::RingSource`], [`uart::Transmitter`] - Serial communication
//! - [`gpio::InputPin`], [`gpio::Button`] - Digital input and the push button
//!
//! [`ring::ReceiveRing`] is the single-producer/single-consumer receive
//! buffer shared between the receive interrupt (or task) and the link.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
pub mod ring;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{ActiveLowButton, Button, InputPin};
pub use ring::{ReceiveRing, DEFAULT_RING_CAPACITY};
pub use uart::{RingSource, TransmitError, Transmitter, UartConfig};
