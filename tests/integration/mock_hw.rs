//! Mock hardware adapter for integration tests.
//!
//! Records every relay write so tests can assert on the full command
//! history without touching real GPIO/ADC registers.

use brewlink::app::events::AppEvent;
use brewlink::app::ports::{EventSink, IndicatorPort, RelayPort};
use brewlink::sensors::indicator::IndicatorReading;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Every level ever applied to the relay, in order.
    pub relay_writes: Vec<bool>,
    /// Raw value the indicator ADC will report.
    pub adc_raw: u16,
    /// Threshold mirrored from the default config.
    pub threshold: u16,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            relay_writes: Vec::new(),
            adc_raw: 0,
            threshold: 2000,
        }
    }

    /// Last relay write, or `false` if none happened yet.
    pub fn relay_on(&self) -> bool {
        self.relay_writes.last().copied().unwrap_or(false)
    }

    /// Drive the fake indicator to agree with the relay, as a healthy
    /// machine would.
    pub fn follow_relay(&mut self) {
        self.adc_raw = if self.relay_on() { 2500 } else { 500 };
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayPort for MockHardware {
    fn apply_power(&mut self, on: bool) {
        self.relay_writes.push(on);
    }

    fn relay_is_on(&self) -> bool {
        self.relay_on()
    }
}

impl IndicatorPort for MockHardware {
    fn sample_indicator(&mut self) -> IndicatorReading {
        IndicatorReading {
            raw: self.adc_raw,
            lit: self.adc_raw > self.threshold,
        }
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn mismatch_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::ConsistencyMismatch { .. }))
            .count()
    }

    pub fn power_change_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::PowerChanged { .. }))
            .count()
    }

    pub fn divergence_latched(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, AppEvent::DivergenceLatched { .. }))
    }

    pub fn divergence_cleared(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, AppEvent::DivergenceCleared))
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
