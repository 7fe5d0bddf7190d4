//! Outbound application events.
//!
//! The [`ApplianceService`](super::service::ApplianceService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them — log to serial, report over the
//! network, etc.

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started (carries the initial commanded state).
    Started { power: bool },

    /// The commanded power state changed and the relay was driven to match.
    PowerChanged { on: bool },

    /// A single consistency check disagreed with the commanded state.
    /// Advisory — indicator lag or sensor noise can cause transients.
    ConsistencyMismatch {
        commanded: bool,
        observed: bool,
        raw: u16,
    },

    /// Enough consecutive counted mismatches accumulated to flag a real
    /// divergence between command and effect.
    DivergenceLatched { commanded: bool, observed: bool },

    /// A matching check cleared a previously latched divergence.
    DivergenceCleared,

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone)]
pub struct TelemetryData {
    pub power_commanded: bool,
    pub relay_on: bool,
    pub indicator_raw: u16,
    pub indicator_lit: bool,
    pub consecutive_mismatches: u32,
    pub diverged: bool,
}
