//! Response writer
//!
//! Serializes outgoing messages so that two messages never interleave on
//! the wire. Before touching the outgoing buffer the writer busy-waits
//! until the transmitter reports that the previous message is gone. The
//! caller (and with it all receive processing) is blocked for that time.
//! At 9600 baud the longest response takes about 11 ms.

use heapless::Vec;
use threepi_hal::Transmitter;
use threepi_protocol::Response;

use crate::error::LinkError;

/// Size of the single in-flight outgoing buffer
pub const OUTGOING_CAPACITY: usize = 32;

/// Blocking writer over an asynchronous transmitter
pub struct ResponseWriter<T> {
    transmitter: T,
    outgoing: Vec<u8, OUTGOING_CAPACITY>,
    /// Maximum idle polls before giving up; `None` waits forever
    wait_limit: Option<u32>,
}

impl<T: Transmitter> ResponseWriter<T> {
    /// Writer that waits without limit
    pub fn new(transmitter: T) -> Self {
        Self {
            transmitter,
            outgoing: Vec::new(),
            wait_limit: None,
        }
    }

    /// Bound the wait for the previous message to `limit` polls
    pub fn with_wait_limit(mut self, limit: Option<u32>) -> Self {
        self.wait_limit = limit;
        self
    }

    /// Block until no transmission is in flight
    pub fn wait_for_idle(&self) -> Result<(), LinkError> {
        let mut polls: u32 = 0;
        while self.transmitter.send_in_progress() {
            if let Some(limit) = self.wait_limit {
                if polls >= limit {
                    return Err(LinkError::SendTimeout);
                }
                polls += 1;
            }
            core::hint::spin_loop();
        }
        Ok(())
    }

    /// Send raw bytes once the line is idle
    pub fn send(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        if bytes.len() > OUTGOING_CAPACITY {
            return Err(LinkError::MessageTooLong);
        }
        self.wait_for_idle()?;

        self.outgoing.clear();
        self.outgoing
            .extend_from_slice(bytes)
            .map_err(|_| LinkError::MessageTooLong)?;
        self.transmitter.transmit(&self.outgoing)?;
        Ok(())
    }

    /// Encode and send a protocol response
    pub fn send_response(&mut self, response: Response) -> Result<(), LinkError> {
        self.send(&response.to_bytes())
    }

    /// Bytes of the most recent message handed to the transmitter
    pub fn last_sent(&self) -> &[u8] {
        &self.outgoing
    }

    /// Access the underlying transmitter
    pub fn transmitter(&self) -> &T {
        &self.transmitter
    }

    /// Mutable access to the underlying transmitter
    pub fn transmitter_mut(&mut self) -> &mut T {
        &mut self.transmitter
    }
}
