//! Battery voltage through a resistor divider
//!
//! The battery feeds an ADC pin through a divider, so the pin sees
//! `vbat * den / num`. Readings are averaged over a few conversions to
//! smooth out motor noise.

use threepi_core::traits::{BatteryError, BatterySense};

/// ADC reading trait for platform abstraction
pub trait AdcReader {
    /// Read one raw conversion
    #[allow(clippy::result_unit_err)]
    fn read(&mut self) -> Result<u16, ()>;
}

/// ADC scaling and divider ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryDivider {
    /// ADC reference voltage in mV
    pub reference_mv: u16,
    /// Highest raw reading (4095 for 12-bit)
    pub adc_max: u16,
    /// Divider ratio numerator (battery side)
    pub ratio_num: u16,
    /// Divider ratio denominator (pin side)
    pub ratio_den: u16,
}

impl Default for BatteryDivider {
    /// 12-bit ADC at 3.3 V behind a 1/3 divider
    fn default() -> Self {
        Self {
            reference_mv: 3300,
            adc_max: 4095,
            ratio_num: 3,
            ratio_den: 1,
        }
    }
}

impl BatteryDivider {
    /// Convert a raw reading to battery millivolts
    ///
    /// Readings above `adc_max` cannot come from a working ADC and are
    /// rejected. Results above `u16::MAX` saturate.
    pub fn to_millivolts(&self, raw: u16) -> Result<u16, BatteryError> {
        if raw > self.adc_max || self.adc_max == 0 || self.ratio_den == 0 {
            return Err(BatteryError::OutOfRange);
        }

        let pin_mv = raw as u64 * self.reference_mv as u64 / self.adc_max as u64;
        let battery_mv = pin_mv * self.ratio_num as u64 / self.ratio_den as u64;
        Ok(battery_mv.min(u16::MAX as u64) as u16)
    }
}

/// Averaging battery monitor
pub struct BatteryMonitor<A> {
    adc: A,
    divider: BatteryDivider,
    samples: u8,
}

impl<A: AdcReader> BatteryMonitor<A> {
    /// Create a monitor averaging `samples` conversions (at least one)
    pub fn new(adc: A, divider: BatteryDivider, samples: u8) -> Self {
        Self {
            adc,
            divider,
            samples: samples.max(1),
        }
    }

    /// Average raw reading over the configured sample count
    pub fn read_raw(&mut self) -> Result<u16, BatteryError> {
        let mut sum: u32 = 0;
        for _ in 0..self.samples {
            sum += self.adc.read().map_err(|_| BatteryError::ReadFailed)? as u32;
        }
        Ok((sum / self.samples as u32) as u16)
    }
}

impl<A: AdcReader> BatterySense for BatteryMonitor<A> {
    fn read_millivolts(&mut self) -> Result<u16, BatteryError> {
        let raw = self.read_raw()?;
        self.divider.to_millivolts(raw)
    }
}
