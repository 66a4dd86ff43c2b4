//! Single-byte commands
//!
//! Every byte value maps to exactly one [`Command`]; bytes outside the
//! command table become [`Command::Echo`].

// Command bytes: robot actions
pub const CMD_NOTE_C: u8 = b'c';
pub const CMD_NOTE_D: u8 = b'd';
pub const CMD_SIGNATURE: u8 = b'g';
pub const CMD_BATTERY: u8 = b'b';
pub const CMD_CLEAR: u8 = b'r';
pub const CMD_PRINT: u8 = b'p';
pub const CMD_STOP: u8 = b's';

// Command bytes: drive with two argument bytes
pub const CMD_DRIVE_BACKWARD: u8 = b'u';
pub const CMD_DRIVE_FORWARD: u8 = b'v';

// Command bytes: single motor at fixed speed
pub const CMD_M1_FORWARD: u8 = b'w';
pub const CMD_M1_BACKWARD: u8 = b'x';
pub const CMD_M2_FORWARD: u8 = b'y';
pub const CMD_M2_BACKWARD: u8 = b'z';

/// Number of argument bytes that follow a drive command
pub const DRIVE_ARGUMENT_COUNT: usize = 2;

/// Note played for [`Command::PlayNoteC`]
pub const NOTE_C: &str = "c16";

/// Note played for [`Command::PlayNoteD`]
pub const NOTE_D: &str = "d16";

/// Which of the two drive motors a command addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorSide {
    /// Motor 1, first argument slot
    Left,
    /// Motor 2, second argument slot
    Right,
}

/// Requested direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveDirection {
    #[default]
    Forward,
    Backward,
}

impl DriveDirection {
    /// Apply this direction to an unsigned-by-convention magnitude
    ///
    /// Computed in 16 bits so that `-128` negates to `128`.
    pub fn apply(self, magnitude: i8) -> i16 {
        match self {
            DriveDirection::Forward => magnitude as i16,
            DriveDirection::Backward => -(magnitude as i16),
        }
    }
}

/// A decoded command byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Play a short C
    PlayNoteC,
    /// Play a short D
    PlayNoteD,
    /// Stop the motors and send the identification string
    Signature,
    /// Send the battery voltage in millivolts
    BatteryReport,
    /// Clear the display
    ClearDisplay,
    /// Show the status placeholder on the display
    ShowStatus,
    /// Stop both motors
    Stop,
    /// Collect two argument bytes, then drive both motors
    BeginDrive(DriveDirection),
    /// Run one motor at the fixed jog speed
    Jog {
        side: MotorSide,
        direction: DriveDirection,
    },
    /// Not a command: send the byte back with its case flipped
    Echo(u8),
}

impl Command {
    /// Decode a received byte
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            CMD_NOTE_C => Command::PlayNoteC,
            CMD_NOTE_D => Command::PlayNoteD,
            CMD_SIGNATURE => Command::Signature,
            CMD_BATTERY => Command::BatteryReport,
            CMD_CLEAR => Command::ClearDisplay,
            CMD_PRINT => Command::ShowStatus,
            CMD_STOP => Command::Stop,
            CMD_DRIVE_BACKWARD => Command::BeginDrive(DriveDirection::Backward),
            CMD_DRIVE_FORWARD => Command::BeginDrive(DriveDirection::Forward),
            CMD_M1_FORWARD => Command::Jog {
                side: MotorSide::Left,
                direction: DriveDirection::Forward,
            },
            CMD_M1_BACKWARD => Command::Jog {
                side: MotorSide::Left,
                direction: DriveDirection::Backward,
            },
            CMD_M2_FORWARD => Command::Jog {
                side: MotorSide::Right,
                direction: DriveDirection::Forward,
            },
            CMD_M2_BACKWARD => Command::Jog {
                side: MotorSide::Right,
                direction: DriveDirection::Backward,
            },
            other => Command::Echo(other),
        }
    }

    /// Convert back to the wire byte
    pub fn to_byte(self) -> u8 {
        match self {
            Command::PlayNoteC => CMD_NOTE_C,
            Command::PlayNoteD => CMD_NOTE_D,
            Command::Signature => CMD_SIGNATURE,
            Command::BatteryReport => CMD_BATTERY,
            Command::ClearDisplay => CMD_CLEAR,
            Command::ShowStatus => CMD_PRINT,
            Command::Stop => CMD_STOP,
            Command::BeginDrive(DriveDirection::Backward) => CMD_DRIVE_BACKWARD,
            Command::BeginDrive(DriveDirection::Forward) => CMD_DRIVE_FORWARD,
            Command::Jog { side, direction } => match (side, direction) {
                (MotorSide::Left, DriveDirection::Forward) => CMD_M1_FORWARD,
                (MotorSide::Left, DriveDirection::Backward) => CMD_M1_BACKWARD,
                (MotorSide::Right, DriveDirection::Forward) => CMD_M2_FORWARD,
                (MotorSide::Right, DriveDirection::Backward) => CMD_M2_BACKWARD,
            },
            Command::Echo(byte) => byte,
        }
    }

    /// Note spec to play, for the tone commands
    pub fn note(&self) -> Option<&'static str> {
        match self {
            Command::PlayNoteC => Some(NOTE_C),
            Command::PlayNoteD => Some(NOTE_D),
            _ => None,
        }
    }

    /// Returns true if argument bytes follow this command
    pub fn takes_arguments(&self) -> bool {
        matches!(self, Command::BeginDrive(_))
    }

    /// Returns true if the byte is in the command table
    pub fn is_known(byte: u8) -> bool {
        !matches!(Command::from_byte(byte), Command::Echo(_))
    }
}
