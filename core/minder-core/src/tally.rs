//! Per-day residency accumulation.
//!
//! The tally counts seconds in which the target process was observed in the
//! process table and decides when the running total goes to the ledger. A
//! flush happens whenever the total is a positive multiple of 5 seconds, so
//! consecutive non-resident ticks rewrite the same value (harmless) and a
//! day with no observed residency writes nothing at all.
//!
//! The flush path is also the single place a date rollover is handled: the
//! caller passes in a freshly observed "today" every tick, and when it
//! stops matching the day the counter accumulated under, the counter
//! restarts at zero under the new day before the flush value is taken.

use crate::clock::DayKey;

/// One tick's outcome: an optional progress observation and an optional
/// ledger write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyTick {
    /// Running total to report, every 5th tick regardless of residency.
    pub progress: Option<u64>,
    /// Ledger write to perform, at positive multiples of 5 resident seconds.
    pub flush: Option<LedgerFlush>,
}

/// A pending ledger write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerFlush {
    pub day: DayKey,
    pub total_secs: u64,
}

/// Accumulates resident seconds for one calendar day at a time.
#[derive(Debug, Clone)]
pub struct ResidencyTally {
    day: DayKey,
    elapsed_secs: u64,
    ticks: u64,
}

impl ResidencyTally {
    /// Starts a tally for `day`, seeded with whatever the ledger already
    /// recorded for it (startup reconciliation).
    pub fn new(day: DayKey, seed_secs: u64) -> Self {
        ResidencyTally {
            day,
            elapsed_secs: seed_secs,
            ticks: 0,
        }
    }

    /// The day the counter is currently accumulating under.
    pub fn day(&self) -> &DayKey {
        &self.day
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    /// Advances one sampling tick.
    ///
    /// `resident` is this tick's process-table observation; `today` must be
    /// freshly read from the clock, not cached across ticks.
    pub fn tick(&mut self, resident: bool, today: DayKey) -> TallyTick {
        if resident {
            self.elapsed_secs += 1;
        }
        self.ticks += 1;

        // Progress reports the pre-rollover total; the reset below only
        // applies to what gets written.
        let progress = (self.ticks % 5 == 0).then_some(self.elapsed_secs);

        let flush = if self.elapsed_secs > 0 && self.elapsed_secs % 5 == 0 {
            if today != self.day {
                self.elapsed_secs = 0;
                self.day = today;
            }
            Some(LedgerFlush {
                day: self.day.clone(),
                total_secs: self.elapsed_secs,
            })
        } else {
            None
        };

        TallyTick { progress, flush }
    }
}
