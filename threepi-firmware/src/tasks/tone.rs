//! Tone task
//!
//! Plays queued notes on the buzzer PWM. Notes play one after another, so
//! a burst of tone commands is heard in order rather than cut short.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_time::Timer;

use threepi_drivers::tone::Note;

use crate::channels::TONE_QUEUE;

/// Buzzer PWM settings
pub struct ToneConfig {
    /// System clock in Hz
    pub clock_hz: u32,
    /// Integer clock divider for the buzzer slice
    pub divider: u8,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            clock_hz: 125_000_000,
            divider: 125, // 1 MHz counter clock
        }
    }
}

/// PWM config producing a 50% square wave at `frequency_hz`, or silence
fn pwm_for(config: &ToneConfig, frequency_hz: u16) -> PwmConfig {
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = config.divider.into();

    if frequency_hz == 0 {
        pwm_config.compare_a = 0;
        return pwm_config;
    }

    let counter_hz = config.clock_hz / config.divider.max(1) as u32;
    let top = (counter_hz / frequency_hz as u32).clamp(2, u16::MAX as u32) - 1;
    pwm_config.top = top as u16;
    pwm_config.compare_a = ((top + 1) / 2) as u16;
    pwm_config
}

/// Buzzer task
#[embassy_executor::task]
pub async fn tone_task(mut pwm: Pwm<'static>, config: ToneConfig) {
    info!("Tone task started");

    let silence = pwm_for(&config, 0);
    pwm.set_config(&silence);

    loop {
        let note: Note = TONE_QUEUE.receive().await;
        trace!("Tone {} Hz for {} ms", note.frequency_hz, note.duration_ms);

        pwm.set_config(&pwm_for(&config, note.frequency_hz));
        Timer::after_millis(note.duration_ms as u64).await;
        pwm.set_config(&silence);
    }
}
