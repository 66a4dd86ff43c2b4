//! Sensor implementations

pub mod battery;

pub use battery::{AdcReader, BatteryDivider, BatteryMonitor};
