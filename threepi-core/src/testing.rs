//! Recording mocks for host tests

use std::cell::Cell;
use std::string::String;
use std::vec::Vec;

use threepi_hal::{Button, TransmitError, Transmitter};
use threepi_protocol::MotorSide;

use crate::traits::{BatteryError, BatterySense, Display, MotorControl, TonePlayer};

/// Transmitter that records every message and simulates in-flight time
pub struct RecordingTransmitter {
    sent: Vec<u8>,
    messages: Vec<Vec<u8>>,
    busy_polls: Cell<u32>,
    in_flight_polls: u32,
    overlapped: bool,
    fail_next: Option<TransmitError>,
}

impl RecordingTransmitter {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            messages: Vec::new(),
            busy_polls: Cell::new(0),
            in_flight_polls: 0,
            overlapped: false,
            fail_next: None,
        }
    }

    /// Report busy for the next `polls` checks
    pub fn set_busy_polls(&mut self, polls: u32) {
        self.busy_polls.set(polls);
    }

    /// Stay busy for `polls` checks after every transmission
    pub fn set_in_flight_polls(&mut self, polls: u32) {
        self.in_flight_polls = polls;
    }

    pub fn fail_next(&mut self, error: TransmitError) {
        self.fail_next = Some(error);
    }

    pub fn busy_polls_remaining(&self) -> u32 {
        self.busy_polls.get()
    }

    /// All transmitted bytes, concatenated
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    pub fn messages(&self) -> &[Vec<u8>] {
        &self.messages
    }

    pub fn transmissions(&self) -> usize {
        self.messages.len()
    }

    pub fn never_overlapped(&self) -> bool {
        !self.overlapped
    }
}

impl Transmitter for RecordingTransmitter {
    fn transmit(&mut self, data: &[u8]) -> Result<(), TransmitError> {
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }
        if self.busy_polls.get() > 0 {
            self.overlapped = true;
        }
        self.sent.extend_from_slice(data);
        self.messages.push(data.to_vec());
        self.busy_polls.set(self.in_flight_polls);
        Ok(())
    }

    fn send_in_progress(&self) -> bool {
        let remaining = self.busy_polls.get();
        if remaining == 0 {
            false
        } else {
            self.busy_polls.set(remaining - 1);
            true
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorCall {
    Single(MotorSide, i16),
    Both(i16, i16),
}

/// Motors that remember every command and the resulting speeds
#[derive(Default)]
pub struct RecordingMotors {
    pub calls: Vec<MotorCall>,
    pub left: i16,
    pub right: i16,
}

impl RecordingMotors {
    pub fn speeds(&self) -> (i16, i16) {
        (self.left, self.right)
    }
}

impl MotorControl for RecordingMotors {
    fn set_speed(&mut self, side: MotorSide, speed: i16) {
        self.calls.push(MotorCall::Single(side, speed));
        match side {
            MotorSide::Left => self.left = speed,
            MotorSide::Right => self.right = speed,
        }
    }

    fn set_motors(&mut self, left: i16, right: i16) {
        self.calls.push(MotorCall::Both(left, right));
        self.left = left;
        self.right = right;
    }
}

/// Display that keeps the text printed since the last clear
#[derive(Default)]
pub struct RecordingDisplay {
    pub text: String,
    pub clears: usize,
}

impl Display for RecordingDisplay {
    fn clear(&mut self) {
        self.text.clear();
        self.clears += 1;
    }

    fn show(&mut self, text: &str) {
        self.text.push_str(text);
    }
}

#[derive(Default)]
pub struct RecordingTone {
    pub notes: Vec<String>,
}

impl TonePlayer for RecordingTone {
    fn play(&mut self, note: &str) {
        self.notes.push(String::from(note));
    }
}

pub struct FixedBattery {
    pub reading: Result<u16, BatteryError>,
    pub reads: usize,
}

impl FixedBattery {
    pub fn new(millivolts: u16) -> Self {
        Self {
            reading: Ok(millivolts),
            reads: 0,
        }
    }
}

impl BatterySense for FixedBattery {
    fn read_millivolts(&mut self) -> Result<u16, BatteryError> {
        self.reads += 1;
        self.reading
    }
}

/// Button pressed on demand, released by the first wait
#[derive(Default)]
pub struct ScriptedButton {
    pub pressed: bool,
    pub releases_awaited: usize,
}

impl Button for ScriptedButton {
    fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn wait_for_release(&mut self) {
        self.releases_awaited += 1;
        self.pressed = false;
    }
}
