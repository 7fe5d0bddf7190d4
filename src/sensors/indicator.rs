//! Power-indicator sense line driver.
//!
//! A phototransistor across the machine's front-panel power LED feeds an
//! ESP32 ADC channel.  A raw reading above the configured threshold means
//! the LED is lit, i.e. the machine really is powered.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the ADC oneshot channel initialised by hw_init.
//! On host/test: reads from a static `AtomicU16` for injection.

use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

static SIM_INDICATOR_ADC: AtomicU16 = AtomicU16::new(0);

/// Inject a raw ADC value for host-side tests and simulation.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_indicator_adc(raw: u16) {
    SIM_INDICATOR_ADC.store(raw, Ordering::Relaxed);
}

/// One observation of the indicator sense line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorReading {
    /// Raw (or sample-averaged) ADC value, 0–4095.
    pub raw: u16,
    /// Whether the reading clears the configured on-threshold.
    pub lit: bool,
}

pub struct IndicatorSensor {
    threshold: u16,
    sample_count: u8,
    last_raw: u16,
    _adc_gpio: i32,
}

impl IndicatorSensor {
    /// `threshold` and `sample_count` come from configuration — the values
    /// are tunables, not business logic (see `SystemConfig`).
    pub fn new(adc_gpio: i32, threshold: u16, sample_count: u8) -> Self {
        Self {
            threshold,
            sample_count: sample_count.max(1),
            last_raw: 0,
            _adc_gpio: adc_gpio,
        }
    }

    /// Take one reading.  With `sample_count > 1` the raw value is the mean
    /// of that many point reads, which knocks down single-sample noise.
    pub fn read(&mut self) -> IndicatorReading {
        let n = self.sample_count as u32;
        let mut sum: u32 = 0;
        for _ in 0..n {
            sum += u32::from(self.read_adc());
        }
        let raw = (sum / n) as u16;
        self.last_raw = raw;

        IndicatorReading {
            raw,
            lit: raw > self.threshold,
        }
    }

    /// Most recent raw value without touching the hardware.
    pub fn last_raw(&self) -> u16 {
        self.last_raw
    }

    pub fn threshold(&self) -> u16 {
        self.threshold
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(pins::ADC1_CH_INDICATOR)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_INDICATOR_ADC.load(Ordering::Relaxed)
    }
}
