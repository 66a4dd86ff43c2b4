//! UART serial communication abstractions
//!
//! The receive side is modelled the way the robot's serial driver works:
//! bytes are written by an interrupt into a circular buffer that is never
//! cleared, and the consumer only ever sees a moving write index. The
//! transmit side is fire-and-forget with a "still sending" predicate.

/// Read side of an interrupt-filled circular receive buffer
///
/// The producer owns the write index; consumers keep their own cursor and
/// compare it against [`RingSource::write_index`] to detect new bytes.
pub trait RingSource {
    /// Number of slots in the circular buffer
    fn capacity(&self) -> usize;

    /// Index the producer will write next, in `0..capacity()`
    fn write_index(&self) -> usize;

    /// Byte currently stored at `index`
    ///
    /// `index` is always in `0..capacity()`. Slots that were never written
    /// read as zero.
    fn byte_at(&self, index: usize) -> u8;
}

/// Errors reported when handing bytes to the transmitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitError {
    /// The transmit queue could not accept the whole message
    Overrun,
    /// The peripheral reported a fault
    Hardware,
}

/// UART transmitter with asynchronous send
pub trait Transmitter {
    /// Start sending `data`
    ///
    /// Returns once the bytes are queued; the bytes are shifted out in the
    /// background. Callers must not start a new transmission while
    /// [`Transmitter::send_in_progress`] is true.
    fn transmit(&mut self, data: &[u8]) -> Result<(), TransmitError>;

    /// Check whether a previous transmission is still being shifted out
    fn send_in_progress(&self) -> bool;
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl UartConfig {
    /// 8N1 at the given baud rate
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// Bits on the wire per transmitted byte (start + data + parity + stop)
    pub fn bits_per_frame(&self) -> u32 {
        let data = match self.data_bits {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
            DataBits::Nine => 9,
        };
        let parity = match self.parity {
            Parity::None => 0,
            Parity::Even | Parity::Odd => 1,
        };
        let stop = match self.stop_bits {
            StopBits::One => 1,
            StopBits::Two => 2,
        };
        1 + data + parity + stop
    }

    /// Maximum number of bytes per second the line can carry
    pub fn bytes_per_second(&self) -> u32 {
        self.baudrate / self.bits_per_frame()
    }
}

impl Default for UartConfig {
    fn default() -> Self {
        Self::with_baudrate(9600)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}
