//! Consistency monitor.
//!
//! Runs on a fixed period and compares the commanded power state against
//! the independent indicator observation.  Mismatches are advisory — the
//! appliance keeps operating — but persistent disagreement is latched so
//! the caller can raise a divergence alert.
//!
//! ## Mismatch lifecycle
//!
//! 1. A check disagrees (`Mismatch` returned to the caller every time).
//! 2. Checks inside the settle window after a power change are not counted:
//!    the relay and the machine's indicator need a moment to follow a
//!    command, and those transients are expected.
//! 3. Counted mismatches accumulate; `mismatch_latch_count` consecutive
//!    ones latch the `diverged` flag.
//! 4. Any matching check resets the count and clears the latch.

use crate::config::SystemConfig;
use crate::sensors::indicator::IndicatorReading;
use log::{info, warn};

/// Outcome of a single commanded-vs-observed comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsistencyResult {
    /// Commanded state and observation agree.
    Match,
    /// They disagree.  Carries both sides so the caller can report them.
    Mismatch { commanded: bool, observed: bool },
}

impl ConsistencyResult {
    pub fn is_match(self) -> bool {
        self == Self::Match
    }
}

/// Consistency monitor state.
pub struct ConsistencyMonitor {
    /// Checks skipped from divergence counting after each power change.
    settle_checks: u32,
    /// Consecutive counted mismatches that latch divergence.
    latch_count: u32,
    /// Checks run since the last commanded power change.
    checks_since_change: u32,
    consecutive_mismatches: u32,
    /// Latched divergence flag.
    diverged: bool,
    /// Reading from the most recent check.
    last_reading: IndicatorReading,
}

impl ConsistencyMonitor {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            settle_checks: u32::from(config.consistency_settle_checks),
            latch_count: u32::from(config.mismatch_latch_count).max(1),
            checks_since_change: u32::MAX,
            consecutive_mismatches: 0,
            diverged: false,
            last_reading: IndicatorReading { raw: 0, lit: false },
        }
    }

    /// Inform the monitor that the commanded state just changed, opening a
    /// fresh settle window.
    pub fn note_power_change(&mut self) {
        self.checks_since_change = 0;
        self.consecutive_mismatches = 0;
    }

    /// Compare one indicator reading against the commanded state.
    ///
    /// The raw per-call result is always returned; the settle window and
    /// the latch only affect the `diverged` flag, never the return value.
    pub fn check(&mut self, commanded: bool, reading: IndicatorReading) -> ConsistencyResult {
        self.last_reading = reading;
        let in_settle_window = self.checks_since_change < self.settle_checks;
        self.checks_since_change = self.checks_since_change.saturating_add(1);

        if reading.lit == commanded {
            self.consecutive_mismatches = 0;
            if self.diverged {
                self.diverged = false;
                info!("consistency: divergence cleared (raw={})", reading.raw);
            }
            return ConsistencyResult::Match;
        }

        if in_settle_window {
            // Expected transient while the relay/indicator catches up.
            return ConsistencyResult::Mismatch {
                commanded,
                observed: reading.lit,
            };
        }

        self.consecutive_mismatches = self.consecutive_mismatches.saturating_add(1);
        if self.consecutive_mismatches >= self.latch_count && !self.diverged {
            self.diverged = true;
            warn!(
                "consistency: divergence latched after {} mismatches (commanded={}, raw={})",
                self.consecutive_mismatches, commanded, reading.raw
            );
        }

        ConsistencyResult::Mismatch {
            commanded,
            observed: reading.lit,
        }
    }

    /// Whether persistent divergence is currently latched.
    pub fn diverged(&self) -> bool {
        self.diverged
    }

    pub fn consecutive_mismatches(&self) -> u32 {
        self.consecutive_mismatches
    }

    /// Reading from the most recent check.
    pub fn last_reading(&self) -> IndicatorReading {
        self.last_reading
    }
}
