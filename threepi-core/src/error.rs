//! Link error type
//!
//! Errors never reach the wire. The byte that caused one is still consumed,
//! and the link carries on with the next byte.

use threepi_hal::TransmitError;

use crate::traits::BatteryError;

/// Errors reported while processing a byte or a button press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// The transmitter rejected a response
    Transmit(TransmitError),
    /// The battery could not be read for a battery report
    Battery(BatteryError),
    /// A response does not fit the outgoing buffer
    MessageTooLong,
    /// The previous transmission did not finish within the wait limit
    SendTimeout,
}

impl From<TransmitError> for LinkError {
    fn from(e: TransmitError) -> Self {
        LinkError::Transmit(e)
    }
}

impl From<BatteryError> for LinkError {
    fn from(e: BatteryError) -> Self {
        LinkError::Battery(e)
    }
}
