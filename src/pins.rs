//! GPIO / peripheral pin assignments for the BrewLink controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Power relay (opto-isolated relay module, active HIGH)
// ---------------------------------------------------------------------------

/// Digital output driving the coffee machine power relay.
pub const RELAY_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// Indicator sense line — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Phototransistor across the machine's power indicator LED, read as an
/// analog voltage.  ADC1 channel 0 (GPIO 0 on ESP32-C6).
pub const INDICATOR_ADC_GPIO: i32 = 0;

/// ADC1 channel index for the indicator sense line.
pub const ADC1_CH_INDICATOR: u32 = 0;

// ---------------------------------------------------------------------------
// ADC configuration
// ---------------------------------------------------------------------------

/// ADC resolution (bits).  12-bit gives a 0–4095 raw range.
pub const ADC_RESOLUTION_BITS: u32 = 12;

/// Full-scale raw ADC value at the configured resolution.
pub const ADC_RAW_MAX: u16 = 4095;
