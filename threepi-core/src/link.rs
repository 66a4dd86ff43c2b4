//! Link main loop
//!
//! Owns the receive cursor, the argument collector and the response writer,
//! and routes each received byte either to the dispatcher (while idle) or
//! to the collector (while a drive command waits for its speeds).
//!
//! One [`Link::poll`] is one iteration of the loop:
//!
//! 1. drain every byte the producer has written past the cursor
//! 2. abandon a stalled drive, if the argument timeout is configured
//! 3. check the button; on a press stop, greet and wait for release
//!
//! The button wait blocks byte processing. Bytes arriving meanwhile stay in
//! the ring, but a producer that laps the cursor overwrites the oldest.

use threepi_hal::{Button, RingSource, Transmitter};
use threepi_protocol::{Command, Response};

use crate::config::LinkConfig;
use crate::cursor::RingCursor;
use crate::dispatch::{collect_argument, dispatch_command, TIMEOUT_TEXT};
use crate::error::LinkError;
use crate::state::{Collector, DriveArguments};
use crate::traits::{BatterySense, Display, MotorControl, TonePlayer};
use crate::writer::ResponseWriter;

/// Physical collaborators driven by the link
pub struct Devices<M, D, S, B> {
    pub motors: M,
    pub display: D,
    pub tone: S,
    pub battery: B,
}

/// What the link did with a byte, a timeout check or a button check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// A byte received while idle ran as a command
    Dispatched(Command),
    /// A drive argument was stored; the other slot is still open
    ArgumentStored { slot: u8, value: i8 },
    /// Both drive arguments arrived and the motors were set
    Drove(DriveArguments),
    /// The collector was found inconsistent and forced back to idle
    CollectorReset,
    /// A stalled drive was abandoned (timeout extension)
    ArgumentTimeout,
    /// The button was pressed and the greeting sent
    Greeted,
}

/// Serial command link
pub struct Link<R, T, M, D, S, B, K> {
    ring: R,
    cursor: RingCursor,
    collector: Collector,
    writer: ResponseWriter<T>,
    devices: Devices<M, D, S, B>,
    button: K,
    config: LinkConfig,
}

impl<R, T, M, D, S, B, K> Link<R, T, M, D, S, B, K>
where
    R: RingSource,
    T: Transmitter,
    M: MotorControl,
    D: Display,
    S: TonePlayer,
    B: BatterySense,
    K: Button,
{
    /// Create a link reading from `ring` with the cursor at index 0
    pub fn new(
        ring: R,
        transmitter: T,
        devices: Devices<M, D, S, B>,
        button: K,
        config: LinkConfig,
    ) -> Self {
        let writer = ResponseWriter::new(transmitter).with_wait_limit(config.send_wait_limit);
        Self {
            cursor: RingCursor::for_ring(&ring),
            ring,
            collector: Collector::new(),
            writer,
            devices,
            button,
            config,
        }
    }

    /// Show the boot message
    pub fn start(&mut self) {
        self.devices.display.clear();
        self.devices.display.show(&self.config.boot_message);
    }

    /// Route one received byte
    pub fn process_byte(&mut self, byte: u8, now_ms: u64) -> Result<LinkEvent, LinkError> {
        if self.collector.mode().is_collecting() {
            return Ok(collect_argument(
                byte,
                &mut self.devices,
                &mut self.collector,
                now_ms,
            ));
        }

        dispatch_command(
            Command::from_byte(byte),
            &mut self.devices,
            &mut self.writer,
            &mut self.collector,
            &self.config,
            now_ms,
        )
    }

    /// Process bytes until the cursor catches up with the producer
    ///
    /// Returns the number of bytes consumed.
    pub fn drain<F>(&mut self, now_ms: u64, on_event: &mut F) -> usize
    where
        F: FnMut(Result<LinkEvent, LinkError>),
    {
        let mut consumed = 0;
        while self.cursor.has_pending(self.ring.write_index()) {
            let byte = self.cursor.peek_and_advance(&self.ring);
            on_event(self.process_byte(byte, now_ms));
            consumed += 1;
        }
        consumed
    }

    /// Abandon a drive whose arguments stopped arriving
    ///
    /// Does nothing unless `argument_timeout_ms` is configured.
    pub fn check_timeout(&mut self, now_ms: u64) -> Option<LinkEvent> {
        let timeout_ms = self.config.argument_timeout_ms?;
        if !self.collector.is_stale(now_ms, timeout_ms) {
            return None;
        }

        self.collector.abandon();
        self.devices.display.clear();
        self.devices.display.show(TIMEOUT_TEXT);
        Some(LinkEvent::ArgumentTimeout)
    }

    /// Greet on a button press, then block until the button is released
    pub fn check_button(&mut self) -> Option<Result<LinkEvent, LinkError>> {
        if !self.button.is_pressed() {
            return None;
        }

        self.devices.motors.stop();
        let sent = self.writer.send_response(Response::Greeting);
        self.button.wait_for_release();
        Some(sent.map(|()| LinkEvent::Greeted))
    }

    /// Run one main-loop iteration
    pub fn poll<F>(&mut self, now_ms: u64, on_event: &mut F)
    where
        F: FnMut(Result<LinkEvent, LinkError>),
    {
        self.drain(now_ms, on_event);

        if let Some(event) = self.check_timeout(now_ms) {
            on_event(Ok(event));
        }

        if let Some(result) = self.check_button() {
            on_event(result);
        }
    }

    pub fn collector(&self) -> &Collector {
        &self.collector
    }

    pub fn cursor(&self) -> &RingCursor {
        &self.cursor
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn devices(&self) -> &Devices<M, D, S, B> {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut Devices<M, D, S, B> {
        &mut self.devices
    }

    pub fn writer(&self) -> &ResponseWriter<T> {
        &self.writer
    }

    pub fn button_mut(&mut self) -> &mut K {
        &mut self.button
    }
}
