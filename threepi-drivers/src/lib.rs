//! Peripheral drivers
//!
//! Concrete implementations of the device traits defined in threepi-core:
//!
//! - Motors: signed speed to PWM duty plus direction, for two channels
//! - Battery: ADC counts through a resistor divider to millivolts
//! - Tone: note spec parsing into frequency and duration
//! - Display: in-memory character LCD model

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod display;
pub mod motor;
pub mod sensor;
pub mod tone;
