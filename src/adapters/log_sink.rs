//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).  A future network reporting
//! adapter would implement the same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { power } => {
                info!("START | power={}", on_off(*power));
            }
            AppEvent::PowerChanged { on } => {
                info!("POWER | relay => {}", on_off(*on));
            }
            AppEvent::ConsistencyMismatch {
                commanded,
                observed,
                raw,
            } => {
                warn!(
                    "CONSIST | commanded={} observed={} (raw={})",
                    on_off(*commanded),
                    on_off(*observed),
                    raw,
                );
            }
            AppEvent::DivergenceLatched {
                commanded,
                observed,
            } => {
                warn!(
                    "CONSIST | DIVERGED: commanded={} but machine reads {}",
                    on_off(*commanded),
                    on_off(*observed),
                );
            }
            AppEvent::DivergenceCleared => {
                info!("CONSIST | divergence cleared");
            }
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | cmd={} relay={} | indicator raw={} lit={} | \
                     mismatches={} diverged={}",
                    on_off(t.power_commanded),
                    on_off(t.relay_on),
                    t.indicator_raw,
                    t.indicator_lit,
                    t.consecutive_mismatches,
                    t.diverged,
                );
            }
        }
    }
}

fn on_off(v: bool) -> &'static str {
    if v { "ON" } else { "OFF" }
}
