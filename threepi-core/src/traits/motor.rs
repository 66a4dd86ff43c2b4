//! Motor control trait
//!
//! The robot has two drive motors. Speeds are signed: positive drives
//! forward, negative backward, zero stops. The link never clamps speeds;
//! range handling belongs to the implementation.

use threepi_protocol::MotorSide;

/// Two-motor drive
pub trait MotorControl {
    /// Set the speed of one motor
    fn set_speed(&mut self, side: MotorSide, speed: i16);

    /// Set both motors at once
    fn set_motors(&mut self, left: i16, right: i16) {
        self.set_speed(MotorSide::Left, left);
        self.set_speed(MotorSide::Right, right);
    }

    /// Stop both motors
    fn stop(&mut self) {
        self.set_motors(0, 0);
    }
}
