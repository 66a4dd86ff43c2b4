//! Motor drivers

pub mod dual;

pub use dual::{DualMotors, HBridge, MotorChannel, MotorOutput, MAX_DUTY};
