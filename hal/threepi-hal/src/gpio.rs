//! GPIO pin abstractions
//!
//! Provides the digital input trait and the momentary push button built
//! on top of it.

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Momentary push button
pub trait Button {
    /// Check if the button is currently held down
    fn is_pressed(&self) -> bool;

    /// Block until the button is released
    ///
    /// Busy-waits with no timeout. Returns immediately if the button is
    /// not pressed.
    fn wait_for_release(&mut self) {
        while self.is_pressed() {
            core::hint::spin_loop();
        }
    }
}

/// Button wired between the pin and ground with a pull-up
///
/// Reads low while pressed.
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowButton<P> {
    /// Wrap an input pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give back the wrapped pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: InputPin> Button for ActiveLowButton<P> {
    fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    /// Pin that reads low for a fixed number of polls, then high
    struct ReleasingPin {
        low_polls: Cell<u32>,
    }

    impl InputPin for ReleasingPin {
        fn is_high(&self) -> bool {
            let remaining = self.low_polls.get();
            if remaining == 0 {
                true
            } else {
                self.low_polls.set(remaining - 1);
                false
            }
        }
    }

    #[test]
    fn test_active_low_pressed() {
        let button = ActiveLowButton::new(ReleasingPin {
            low_polls: Cell::new(1),
        });
        assert!(button.is_pressed());
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_wait_for_release_polls_until_high() {
        let mut button = ActiveLowButton::new(ReleasingPin {
            low_polls: Cell::new(5),
        });
        button.wait_for_release();
        assert!(!button.is_pressed());
        assert_eq!(button.release().low_polls.get(), 0);
    }

    #[test]
    fn test_wait_for_release_when_not_pressed() {
        let mut button = ActiveLowButton::new(ReleasingPin {
            low_polls: Cell::new(0),
        });
        button.wait_for_release();
        assert!(!button.is_pressed());
    }
}
