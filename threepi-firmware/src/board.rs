//! Board bindings
//!
//! Connects the link's device traits to RP2040 peripherals.
//!
//! Pin assignments:
//! - UART0: TX GPIO0, RX GPIO1
//! - Left motor: PWM GPIO2 (slice 1 A), direction GPIO3
//! - Right motor: PWM GPIO6 (slice 3 A), direction GPIO7
//! - Buzzer: PWM GPIO14 (slice 7 A)
//! - Button: GPIO15 to ground, internal pull-up
//! - Battery divider: ADC0 on GPIO26

use defmt::*;
use embassy_rp::adc::{self, Adc};
use embassy_rp::gpio::{Input, Output};
use embassy_rp::pwm::PwmOutput;
use embassy_rp::uart::{self, BufferedUartTx};

use threepi_core::traits::{Display, TonePlayer};
use threepi_core::{Link, LinkConfig};
use threepi_drivers::display::LcdScreen;
use threepi_drivers::motor::{DualMotors, HBridge};
use threepi_drivers::sensor::{AdcReader, BatteryMonitor};
use threepi_drivers::tone::parse_note;
use threepi_hal::{ActiveLowButton, InputPin, ReceiveRing, TransmitError, Transmitter, UartConfig};

use crate::channels::{RX_RING_CAPACITY, TONE_QUEUE};

/// Motor pair on two H-bridges
pub type BoardMotors =
    DualMotors<HBridge<PwmOutput<'static>, Output<'static>>, HBridge<PwmOutput<'static>, Output<'static>>>;

/// The link as wired on this board
pub type BoardLink = Link<
    &'static ReceiveRing<RX_RING_CAPACITY>,
    UartTransmitter,
    BoardMotors,
    LoggedScreen,
    QueuedTone,
    BatteryMonitor<AdcBattery>,
    ActiveLowButton<ButtonPin>,
>;

/// Embassy UART configuration for the link's line settings
pub fn uart_config(config: &LinkConfig) -> uart::Config {
    let line = UartConfig::with_baudrate(config.baud_rate);
    let mut cfg = uart::Config::default();
    cfg.baudrate = line.baudrate;
    cfg.data_bits = match line.data_bits {
        threepi_hal::uart::DataBits::Seven => uart::DataBits::DataBits7,
        _ => uart::DataBits::DataBits8,
    };
    cfg.parity = match line.parity {
        threepi_hal::uart::Parity::None => uart::Parity::ParityNone,
        threepi_hal::uart::Parity::Even => uart::Parity::ParityEven,
        threepi_hal::uart::Parity::Odd => uart::Parity::ParityOdd,
    };
    cfg.stop_bits = match line.stop_bits {
        threepi_hal::uart::StopBits::One => uart::StopBits::STOP1,
        threepi_hal::uart::StopBits::Two => uart::StopBits::STOP2,
    };
    cfg
}

/// Buffered UART transmit half
///
/// `transmit` copies into the driver's TX buffer; the interrupt handler
/// shifts it out while the link carries on.
pub struct UartTransmitter {
    tx: BufferedUartTx,
}

impl UartTransmitter {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl Transmitter for UartTransmitter {
    fn transmit(&mut self, data: &[u8]) -> Result<(), TransmitError> {
        let mut rest = data;
        while !rest.is_empty() {
            let written = self.tx.blocking_write(rest).map_err(|e| match e {
                uart::Error::Overrun => TransmitError::Overrun,
                _ => TransmitError::Hardware,
            })?;
            rest = &rest[written..];
        }
        Ok(())
    }

    fn send_in_progress(&self) -> bool {
        self.tx.busy()
    }
}

/// Character LCD model that logs its rows on change
#[derive(Default)]
pub struct LoggedScreen {
    screen: LcdScreen,
}

impl LoggedScreen {
    fn log_if_changed(&mut self) {
        if self.screen.take_dirty() {
            debug!(
                "LCD [{}] [{}]",
                self.screen.row_text(0),
                self.screen.row_text(1)
            );
        }
    }
}

impl Display for LoggedScreen {
    fn clear(&mut self) {
        self.screen.clear();
        self.log_if_changed();
    }

    fn show(&mut self, text: &str) {
        self.screen.print(text);
        self.log_if_changed();
    }
}

/// Tone player that hands notes to the tone task
pub struct QueuedTone;

impl TonePlayer for QueuedTone {
    fn play(&mut self, spec: &str) {
        match parse_note(spec) {
            Ok(note) => {
                if TONE_QUEUE.try_send(note).is_err() {
                    warn!("Tone queue full, dropping {}", spec);
                }
            }
            Err(e) => warn!("Bad note spec {}: {:?}", spec, e),
        }
    }
}

/// Battery divider input on the ADC
pub struct AdcBattery {
    adc: Adc<'static, adc::Blocking>,
    channel: adc::Channel<'static>,
}

impl AdcBattery {
    pub fn new(adc: Adc<'static, adc::Blocking>, channel: adc::Channel<'static>) -> Self {
        Self { adc, channel }
    }
}

impl AdcReader for AdcBattery {
    fn read(&mut self) -> Result<u16, ()> {
        self.adc.blocking_read(&mut self.channel).map_err(|_| ())
    }
}

/// Button input pin
pub struct ButtonPin(pub Input<'static>);

impl InputPin for ButtonPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}
