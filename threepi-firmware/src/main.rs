//! threepi - serial command link firmware
//!
//! Firmware binary for RP2040-based robot boards. A host sends single-byte
//! commands over UART0; the link drives the motors, buzzer and display and
//! answers identification, battery and echo requests.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use threepi_core::{Devices, Link};
use threepi_drivers::motor::{DualMotors, HBridge};
use threepi_drivers::sensor::{BatteryDivider, BatteryMonitor};
use threepi_hal::{ActiveLowButton, UartConfig};

mod board;
mod channels;
mod config;
mod tasks;

use board::{AdcBattery, ButtonPin, LoggedScreen, QueuedTone, UartTransmitter};
use channels::RX_RING;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// Motor PWM wrap value; duty is set through the fraction API
const MOTOR_PWM_TOP: u16 = 999;

/// ADC conversions averaged per battery reading
const BATTERY_SAMPLES: u8 = 8;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("threepi firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let link_config = config::load();

    // Serial line
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, board::uart_config(&link_config));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let line = UartConfig::with_baudrate(link_config.baud_rate);
    info!(
        "UART initialized at {} baud ({} bytes/s)",
        line.baudrate,
        line.bytes_per_second()
    );

    // Drive motors
    let mut motor_pwm = PwmConfig::default();
    motor_pwm.top = MOTOR_PWM_TOP;
    motor_pwm.compare_a = 0;
    let (left_pwm, _) = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, motor_pwm.clone()).split();
    let (right_pwm, _) = Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, motor_pwm).split();
    let (Some(left_pwm), Some(right_pwm)) = (left_pwm, right_pwm) else {
        defmt::panic!("Motor PWM outputs unavailable");
    };
    let left = HBridge::new(left_pwm, Output::new(p.PIN_3, Level::Low), true);
    // Right motor is mounted mirrored
    let right = HBridge::new(right_pwm, Output::new(p.PIN_7, Level::Low), false);
    let motors = DualMotors::new(left, right);
    info!("Motors initialized");

    // Battery sense
    let adc = Adc::new_blocking(p.ADC, adc::Config::default());
    let battery_channel = adc::Channel::new_pin(p.PIN_26, Pull::None);
    let battery = BatteryMonitor::new(
        AdcBattery::new(adc, battery_channel),
        BatteryDivider::default(),
        BATTERY_SAMPLES,
    );

    // Buzzer
    let buzzer = Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, PwmConfig::default());

    // Button
    let button = ActiveLowButton::new(ButtonPin(Input::new(p.PIN_15, Pull::Up)));

    let devices = Devices {
        motors,
        display: LoggedScreen::default(),
        tone: QueuedTone,
        battery,
    };
    let link = Link::new(
        &RX_RING,
        UartTransmitter::new(tx),
        devices,
        button,
        link_config,
    );

    info!("Spawning tasks...");
    spawner.spawn(tasks::uart_rx_task(rx, &RX_RING)).unwrap();
    spawner
        .spawn(tasks::tone_task(buzzer, tasks::ToneConfig::default()))
        .unwrap();
    spawner.spawn(tasks::link_task(link)).unwrap();

    info!("threepi firmware running");
}
