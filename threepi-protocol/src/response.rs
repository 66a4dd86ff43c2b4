//! Bytes the robot sends back
//!
//! Responses are unframed. Each one is a short fixed-size byte string.

use heapless::Vec;

/// Identification string sent for the signature command
pub const SIGNATURE: &[u8; 3] = b"3pi";

/// Greeting sent when the button is pressed
pub const GREETING: &[u8; 11] = b"Hi there!\r\n";

/// Bit toggled on echoed bytes (ASCII case flip for letters)
pub const CASE_FLIP_MASK: u8 = 0x20;

/// Longest response the robot ever sends
pub const MAX_RESPONSE_LEN: usize = GREETING.len();

/// Flip bit 5 of a byte
///
/// For ASCII letters this swaps upper and lower case. Applying it twice
/// gives back the original byte.
pub const fn case_flip(byte: u8) -> u8 {
    byte ^ CASE_FLIP_MASK
}

/// A response message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// `"3pi"`
    Signature,
    /// Battery voltage in millivolts, sent little-endian
    Battery { millivolts: u16 },
    /// A received non-command byte with its case flipped
    Echo(u8),
    /// `"Hi there!\r\n"`
    Greeting,
}

impl Response {
    /// Build the echo response for a received byte
    pub fn echo_of(received: u8) -> Self {
        Response::Echo(case_flip(received))
    }

    /// Number of bytes this response occupies on the wire
    pub fn len(&self) -> usize {
        match self {
            Response::Signature => SIGNATURE.len(),
            Response::Battery { .. } => 2,
            Response::Echo(_) => 1,
            Response::Greeting => GREETING.len(),
        }
    }

    /// Responses are never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Encode into wire bytes
    pub fn to_bytes(&self) -> Vec<u8, MAX_RESPONSE_LEN> {
        let mut bytes = Vec::new();
        // Every response fits in MAX_RESPONSE_LEN
        match self {
            Response::Signature => {
                let _ = bytes.extend_from_slice(SIGNATURE);
            }
            Response::Battery { millivolts } => {
                let _ = bytes.extend_from_slice(&millivolts.to_le_bytes());
            }
            Response::Echo(byte) => {
                let _ = bytes.push(*byte);
            }
            Response::Greeting => {
                let _ = bytes.extend_from_slice(GREETING);
            }
        }
        bytes
    }
}
