//! The attribute store — single authoritative power state.
//!
//! Exactly one instance exists for the process lifetime, owned by the
//! [`ApplianceService`](super::service::ApplianceService).  Only the
//! command dispatcher mutates it; the consistency monitor on the other
//! execution context reads it.  The backing storage is an `AtomicBool` so a
//! concurrent read can never observe a torn value.

use core::sync::atomic::{AtomicBool, Ordering};

use super::ports::RelayPort;

/// Authoritative "is the appliance commanded on" state, with write-through
/// to the physical relay.
pub struct AttributeStore {
    commanded: AtomicBool,
}

impl AttributeStore {
    /// A new store in the inactive state.  The appliance must never power
    /// on unintentionally at boot, so `off` is the only valid start value.
    pub const fn new() -> Self {
        Self {
            commanded: AtomicBool::new(false),
        }
    }

    /// Update the commanded state, then immediately drive the relay to
    /// match.  Write-through — the relay is never left holding a stale
    /// level, and re-applying an unchanged level is harmless.
    pub fn set(&self, on: bool, hw: &mut impl RelayPort) {
        self.commanded.store(on, Ordering::Release);
        hw.apply_power(on);
    }

    /// The last commanded value.  Always consistent with the last `set`.
    pub fn get(&self) -> bool {
        self.commanded.load(Ordering::Acquire)
    }
}

impl Default for AttributeStore {
    fn default() -> Self {
        Self::new()
    }
}
