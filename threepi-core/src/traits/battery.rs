//! Battery voltage sensing

/// Errors that can occur reading the battery voltage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryError {
    /// The ADC conversion failed
    ReadFailed,
    /// The reading is outside what the divider can produce
    OutOfRange,
}

/// Battery voltage sensor
pub trait BatterySense {
    /// Read the battery voltage in millivolts
    fn read_millivolts(&mut self) -> Result<u16, BatteryError>;
}
