//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ApplianceService (domain)
//! ```
//!
//! Driven adapters (the relay, the indicator sense line, event sinks,
//! config storage) implement these traits.  The
//! [`ApplianceService`](super::service::ApplianceService) consumes them via
//! generics, so the domain core never touches hardware directly.

use crate::config::SystemConfig;
use crate::sensors::indicator::IndicatorReading;

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the attribute store drives the physical relay through
/// this.  Writes are best-effort single-shot hardware operations with no
/// software-observable failure.
pub trait RelayPort {
    /// Drive the relay output to the given power state.
    fn apply_power(&mut self, on: bool);

    /// Last state the relay output was driven to.
    fn relay_is_on(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the consistency monitor obtains the independent analog
/// observation of the appliance through this.
pub trait IndicatorPort {
    /// Take one reading of the indicator sense line.
    fn sample_indicator(&mut self) -> IndicatorReading;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting.  Invalid
/// ranges are rejected with [`ConfigError::ValidationFailed`], not silently
/// clamped — a dead consistency monitor configured through a bad threshold
/// is worse than a rejected write.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
