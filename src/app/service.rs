//! Appliance service — the hexagonal core.
//!
//! [`ApplianceService`] owns the endpoint binding, the attribute store, and
//! the consistency monitor.  It exposes a clean, hardware-agnostic API; all
//! I/O flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  CommandEvent ──▶ ┌────────────────────────────┐ ──▶ EventSink
//!                   │      ApplianceService       │
//!     RelayPort ◀── │  Dispatcher · Store · Mon.  │ ◀── IndicatorPort
//!                   └────────────────────────────┘
//! ```

use log::{debug, error, info, warn};

use crate::config::SystemConfig;
use crate::error::DispatchError;
use crate::monitor::{ConsistencyMonitor, ConsistencyResult};
use crate::zcl::{EndpointBinding, ZbStatus};

use super::commands::{CommandEvent, PowerCommand};
use super::events::{AppEvent, TelemetryData};
use super::ports::{EventSink, IndicatorPort, RelayPort};
use super::store::AttributeStore;

// ───────────────────────────────────────────────────────────────
// ApplianceService
// ───────────────────────────────────────────────────────────────

/// Orchestrates command dispatch, the authoritative power state, and the
/// commanded-vs-observed consistency check.
pub struct ApplianceService {
    binding: EndpointBinding,
    store: AttributeStore,
    monitor: ConsistencyMonitor,
}

impl ApplianceService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware — call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            binding: EndpointBinding::from_config(config),
            store: AttributeStore::new(),
            monitor: ConsistencyMonitor::new(config),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Assert the boot-safe state: commanded off, relay driven off.
    pub fn start(&mut self, hw: &mut impl RelayPort, sink: &mut impl EventSink) {
        self.store.set(false, hw);
        sink.emit(&AppEvent::Started { power: false });
        info!("ApplianceService started, binding {}", self.binding.path());
    }

    // ── Command dispatch ──────────────────────────────────────

    /// Dispatch one decoded command event.
    ///
    /// * `None` — the record was absent or malformed: logged, state
    ///   untouched, [`DispatchError::NullEvent`].
    /// * Attribute writes for a different endpoint/cluster/attribute or
    ///   with the wrong payload type are ignored without error — traffic
    ///   for other appliances passes through unaffected.
    /// * Raw power commands apply unconditionally.
    ///
    /// At most one attribute-store mutation happens per call; dispatch is
    /// synchronous and non-blocking.
    pub fn dispatch(
        &mut self,
        event: Option<CommandEvent>,
        hw: &mut impl RelayPort,
        sink: &mut impl EventSink,
    ) -> Result<(), DispatchError> {
        let Some(event) = event else {
            error!("dispatch: null command event");
            return Err(DispatchError::NullEvent);
        };

        match event {
            CommandEvent::SetAttribute { path, value } => {
                if !self.binding.accepts(&path, &value) {
                    debug!("dispatch: ignoring attribute write for {}", path);
                    return Ok(());
                }
                match value.as_bool() {
                    Some(on) => {
                        info!("dispatch: on/off attribute => {}", if on { "ON" } else { "OFF" });
                        self.set_power(on, hw, sink);
                    }
                    None => warn!("dispatch: boolean attribute carried no payload, ignoring"),
                }
                Ok(())
            }

            CommandEvent::Power(cmd) => {
                let on = match cmd {
                    PowerCommand::On => true,
                    PowerCommand::Off => false,
                    PowerCommand::Toggle => !self.store.get(),
                };
                info!("dispatch: {:?} command => {}", cmd, if on { "ON" } else { "OFF" });
                self.set_power(on, hw, sink);
                Ok(())
            }

            CommandEvent::Other(id) => {
                debug!("dispatch: unhandled stack action 0x{:04x}", id);
                Ok(())
            }
        }
    }

    /// Process-boundary wrapper around [`dispatch`](Self::dispatch),
    /// returning the status code the network stack expects.
    pub fn on_network_event(
        &mut self,
        event: Option<CommandEvent>,
        hw: &mut impl RelayPort,
        sink: &mut impl EventSink,
    ) -> ZbStatus {
        match self.dispatch(event, hw, sink) {
            Ok(()) => ZbStatus::Ok,
            Err(_) => ZbStatus::Fail,
        }
    }

    // ── Consistency check ─────────────────────────────────────

    /// Sample the indicator and compare against the commanded state.
    ///
    /// Mismatches are advisory: they are reported through the sink and the
    /// result is returned, but operation always continues.
    pub fn run_consistency_check(
        &mut self,
        hw: &mut impl IndicatorPort,
        sink: &mut impl EventSink,
    ) -> ConsistencyResult {
        let commanded = self.store.get();
        let reading = hw.sample_indicator();

        let was_diverged = self.monitor.diverged();
        let result = self.monitor.check(commanded, reading);

        if let ConsistencyResult::Mismatch { commanded, observed } = result {
            sink.emit(&AppEvent::ConsistencyMismatch {
                commanded,
                observed,
                raw: reading.raw,
            });
        }

        match (was_diverged, self.monitor.diverged()) {
            (false, true) => sink.emit(&AppEvent::DivergenceLatched {
                commanded,
                observed: reading.lit,
            }),
            (true, false) => sink.emit(&AppEvent::DivergenceCleared),
            _ => {}
        }

        result
    }

    // ── Queries ───────────────────────────────────────────────

    /// The current commanded power state.
    pub fn power_commanded(&self) -> bool {
        self.store.get()
    }

    /// Whether persistent commanded-vs-observed divergence is latched.
    pub fn diverged(&self) -> bool {
        self.monitor.diverged()
    }

    /// The binding this appliance listens on.
    pub fn binding(&self) -> &EndpointBinding {
        &self.binding
    }

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&self, hw: &impl RelayPort) -> TelemetryData {
        let reading = self.monitor.last_reading();
        TelemetryData {
            power_commanded: self.store.get(),
            relay_on: hw.relay_is_on(),
            indicator_raw: reading.raw,
            indicator_lit: reading.lit,
            consecutive_mismatches: self.monitor.consecutive_mismatches(),
            diverged: self.monitor.diverged(),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// The single mutation path: write through the store, open a settle
    /// window, and report the change.
    fn set_power(&mut self, on: bool, hw: &mut impl RelayPort, sink: &mut impl EventSink) {
        let prev = self.store.get();
        self.store.set(on, hw);
        if prev != on {
            self.monitor.note_power_change();
            sink.emit(&AppEvent::PowerChanged { on });
        }
    }
}
