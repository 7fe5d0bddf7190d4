//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the relay driver and the indicator sensor, exposing them through
//! [`RelayPort`] and [`IndicatorPort`].  This is the only module in the
//! system that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{IndicatorPort, RelayPort};
use crate::drivers::relay::RelayDriver;
use crate::sensors::indicator::{IndicatorReading, IndicatorSensor};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    relay: RelayDriver,
    indicator: IndicatorSensor,
}

impl HardwareAdapter {
    /// Pass in pre-built drivers (built in main where peripheral ownership
    /// is established).
    pub fn new(relay: RelayDriver, indicator: IndicatorSensor) -> Self {
        Self { relay, indicator }
    }
}

// ── RelayPort implementation ──────────────────────────────────

impl RelayPort for HardwareAdapter {
    fn apply_power(&mut self, on: bool) {
        self.relay.apply(on);
    }

    fn relay_is_on(&self) -> bool {
        self.relay.is_on()
    }
}

// ── IndicatorPort implementation ──────────────────────────────

impl IndicatorPort for HardwareAdapter {
    fn sample_indicator(&mut self) -> IndicatorReading {
        self.indicator.read()
    }
}
