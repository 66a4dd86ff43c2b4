//! Dual H-bridge drive
//!
//! Maps signed speeds onto two motor channels. A speed's magnitude becomes
//! the duty (0-255, clamped) and its sign picks the direction, so `-300`
//! and `-255` both run backward at full duty.
//!
//! ```ignore
//! let mut motors = DualMotors::new(left, right);
//! motors.set_motors(100, -100); // spin in place
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use threepi_core::traits::MotorControl;
use threepi_protocol::MotorSide;

/// Full-scale duty
pub const MAX_DUTY: u8 = 255;

/// Duty and direction for one motor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorOutput {
    /// Duty in 1/255 steps
    pub duty: u8,
    /// True to drive backward
    pub reverse: bool,
}

impl MotorOutput {
    /// Stopped output
    pub const fn stopped() -> Self {
        Self {
            duty: 0,
            reverse: false,
        }
    }

    /// Convert a signed speed, clamping the magnitude to [`MAX_DUTY`]
    pub fn from_speed(speed: i16) -> Self {
        let magnitude = speed.unsigned_abs().min(MAX_DUTY as u16);
        Self {
            duty: magnitude as u8,
            reverse: speed < 0,
        }
    }

    /// Signed speed this output represents
    pub fn speed(&self) -> i16 {
        if self.reverse {
            -(self.duty as i16)
        } else {
            self.duty as i16
        }
    }
}

/// One motor's output stage
pub trait MotorChannel {
    /// Apply duty and direction
    fn apply(&mut self, output: MotorOutput);
}

/// H-bridge driven by a PWM output and a direction pin
pub struct HBridge<P, D> {
    pwm: P,
    direction: D,
    /// Direction pin level that means forward
    forward_high: bool,
}

impl<P: SetDutyCycle, D: OutputPin> HBridge<P, D> {
    /// Create a stopped H-bridge
    pub fn new(pwm: P, direction: D, forward_high: bool) -> Self {
        let mut bridge = Self {
            pwm,
            direction,
            forward_high,
        };
        bridge.apply(MotorOutput::stopped());
        bridge
    }

    /// Release the PWM output and direction pin
    pub fn release(self) -> (P, D) {
        (self.pwm, self.direction)
    }
}

impl<P: SetDutyCycle, D: OutputPin> MotorChannel for HBridge<P, D> {
    fn apply(&mut self, output: MotorOutput) {
        // Pin and PWM errors have nowhere to go; the next command retries
        let _ = if output.reverse != self.forward_high {
            self.direction.set_high()
        } else {
            self.direction.set_low()
        };
        let _ = self
            .pwm
            .set_duty_cycle_fraction(output.duty as u16, MAX_DUTY as u16);
    }
}

/// Left and right motor pair
pub struct DualMotors<L, R> {
    left: L,
    right: R,
    outputs: [MotorOutput; 2],
}

impl<L: MotorChannel, R: MotorChannel> DualMotors<L, R> {
    /// Create the pair with both motors stopped
    pub fn new(mut left: L, mut right: R) -> Self {
        left.apply(MotorOutput::stopped());
        right.apply(MotorOutput::stopped());
        Self {
            left,
            right,
            outputs: [MotorOutput::stopped(); 2],
        }
    }

    /// Output last applied to `side`
    pub fn output(&self, side: MotorSide) -> MotorOutput {
        match side {
            MotorSide::Left => self.outputs[0],
            MotorSide::Right => self.outputs[1],
        }
    }

    /// Check if both motors are stopped
    pub fn is_stopped(&self) -> bool {
        self.outputs.iter().all(|o| o.duty == 0)
    }
}

impl<L: MotorChannel, R: MotorChannel> MotorControl for DualMotors<L, R> {
    fn set_speed(&mut self, side: MotorSide, speed: i16) {
        let output = MotorOutput::from_speed(speed);
        match side {
            MotorSide::Left => {
                self.left.apply(output);
                self.outputs[0] = output;
            }
            MotorSide::Right => {
                self.right.apply(output);
                self.outputs[1] = output;
            }
        }
    }
}
