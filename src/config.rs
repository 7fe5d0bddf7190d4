//! System configuration parameters
//!
//! All tunable parameters for the BrewLink controller.
//! Values can be overridden via NVS (non-volatile storage).

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Zigbee addressing ---
    /// Endpoint number the On/Off cluster binding listens on
    pub endpoint_id: u8,

    // --- Indicator sense line ---
    /// Raw ADC value above which the indicator LED counts as lit (of 0-4095)
    pub indicator_on_threshold: u16,
    /// Number of raw samples averaged per reading (1 = single point read)
    pub indicator_sample_count: u8,

    // --- Consistency monitor ---
    /// Interval between commanded-vs-observed checks (milliseconds)
    pub consistency_check_interval_ms: u32,
    /// Checks skipped from divergence counting after a power change,
    /// covering relay/indicator propagation latency
    pub consistency_settle_checks: u8,
    /// Consecutive counted mismatches before divergence is latched
    pub mismatch_latch_count: u8,

    // --- Timing ---
    /// Command queue poll interval (milliseconds)
    pub command_poll_interval_ms: u32,
    /// Telemetry report interval (seconds)
    pub telemetry_interval_secs: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Zigbee
            endpoint_id: 10,

            // Indicator
            indicator_on_threshold: 2000,
            indicator_sample_count: 1,

            // Consistency monitor
            consistency_check_interval_ms: 1000, // 1 Hz
            consistency_settle_checks: 2,
            mismatch_latch_count: 3,

            // Timing
            command_poll_interval_ms: 50,
            telemetry_interval_secs: 60, // 1/min
        }
    }
}
