//! Command dispatcher and argument handling
//!
//! [`dispatch_command`] runs while the collector is idle and maps one
//! command to its action. [`collect_argument`] runs while a drive command
//! is collecting its two speed bytes, and drives the motors once both
//! arrived.

use core::fmt::Write;

use heapless::String;
use threepi_hal::Transmitter;
use threepi_protocol::{Command, DriveDirection, MotorSide, Response};

use crate::config::LinkConfig;
use crate::error::LinkError;
use crate::link::{Devices, LinkEvent};
use crate::state::{Collected, Collector};
use crate::traits::{BatterySense, Display, MotorControl, TonePlayer};
use crate::writer::ResponseWriter;

/// Shown next to the signature response
pub const SIGNATURE_TEXT: &str = "3pi";
/// Shown for the status command
pub const STATUS_TEXT: &str = "ready";
/// Shown when a backward drive starts collecting
pub const BACK_TEXT: &str = "back";
/// Shown when a forward drive starts collecting
pub const DRIVE_TEXT: &str = "drive";
/// Appended after the first speed byte arrives
pub const PROGRESS_TEXT: &str = " 1";
/// Shown when the offset counter is found out of range
pub const ERROR_TEXT: &str = "error";
/// Shown when a stalled drive is abandoned
pub const TIMEOUT_TEXT: &str = "timeout";

/// Length of the longest "go a b" line, `"go -128 -128"`
pub const DRIVE_LINE_LEN: usize = 12;

/// Run one command received while idle
pub fn dispatch_command<T, M, D, S, B>(
    command: Command,
    devices: &mut Devices<M, D, S, B>,
    writer: &mut ResponseWriter<T>,
    collector: &mut Collector,
    config: &LinkConfig,
    now_ms: u64,
) -> Result<LinkEvent, LinkError>
where
    T: Transmitter,
    M: MotorControl,
    D: Display,
    S: TonePlayer,
    B: BatterySense,
{
    match command {
        Command::PlayNoteC | Command::PlayNoteD => {
            if let Some(note) = command.note() {
                devices.tone.play(note);
            }
        }
        Command::Signature => {
            devices.display.show(SIGNATURE_TEXT);
            devices.motors.stop();
            writer.send_response(Response::Signature)?;
        }
        Command::BatteryReport => {
            let millivolts = devices.battery.read_millivolts()?;
            writer.send_response(Response::Battery { millivolts })?;
        }
        Command::ClearDisplay => devices.display.clear(),
        Command::ShowStatus => devices.display.show(STATUS_TEXT),
        Command::Stop => devices.motors.stop(),
        Command::BeginDrive(direction) => {
            devices.display.clear();
            devices.display.show(match direction {
                DriveDirection::Forward => DRIVE_TEXT,
                DriveDirection::Backward => BACK_TEXT,
            });
            collector.begin(direction, now_ms);
        }
        Command::Jog { side, direction: _ } => {
            // Direction is ignored: 'x' and 'z' spin forward like 'w' and 'y'
            jog(&mut devices.motors, side, config.fixed_speed);
        }
        Command::Echo(byte) => {
            writer.send_response(Response::echo_of(byte))?;
        }
    }
    Ok(LinkEvent::Dispatched(command))
}

fn jog<M: MotorControl>(motors: &mut M, side: MotorSide, speed: i16) {
    motors.set_speed(side, speed);
}

/// Feed one byte to a collection in progress
pub fn collect_argument<M, D, S, B>(
    byte: u8,
    devices: &mut Devices<M, D, S, B>,
    collector: &mut Collector,
    now_ms: u64,
) -> LinkEvent
where
    M: MotorControl,
    D: Display,
{
    match collector.accept(byte, now_ms) {
        Collected::Stored { slot, value } => {
            devices.display.show(PROGRESS_TEXT);
            LinkEvent::ArgumentStored { slot, value }
        }
        Collected::Complete(arguments) => {
            devices
                .motors
                .set_motors(arguments.left_speed(), arguments.right_speed());

            // Two i8 values always fit in DRIVE_LINE_LEN
            let mut line: String<DRIVE_LINE_LEN> = String::new();
            let _ = write!(line, "go {} {}", arguments.slots[0], arguments.slots[1]);
            devices.display.clear();
            devices.display.show(&line);

            LinkEvent::Drove(arguments)
        }
        Collected::Inconsistent => {
            devices.display.clear();
            devices.display.show(ERROR_TEXT);
            LinkEvent::CollectorReset
        }
    }
}
