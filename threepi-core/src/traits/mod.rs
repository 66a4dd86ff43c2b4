//! Device traits
//!
//! These traits define the interface between the link logic and the
//! robot's peripherals. Serial and button traits live in `threepi-hal`.

pub mod battery;
pub mod display;
pub mod motor;
pub mod tone;

pub use battery::{BatteryError, BatterySense};
pub use display::Display;
pub use motor::MotorControl;
pub use tone::TonePlayer;
