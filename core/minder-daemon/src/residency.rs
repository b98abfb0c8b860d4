//! Residency sampling and ledger persistence loop.

use minder_core::{format_duration, DayKey, DayLedger, ResidencyTally};
use tracing::{debug, info, warn};

use crate::platform::ProcessTable;

/// Samples the process table once per tick and owns the ledger after
/// startup seeding. A flush that fails to write is logged and retried on
/// the next multiple of five; the loop itself never dies over it.
pub struct ResidencyAccumulator<P: ProcessTable> {
    table: P,
    process_name: String,
    ledger: DayLedger,
    tally: ResidencyTally,
}

impl<P: ProcessTable> ResidencyAccumulator<P> {
    pub fn new(table: P, process_name: String, ledger: DayLedger, tally: ResidencyTally) -> Self {
        ResidencyAccumulator {
            table,
            process_name,
            ledger,
            tally,
        }
    }

    pub fn tally(&self) -> &ResidencyTally {
        &self.tally
    }

    pub fn run_tick(&mut self) {
        let resident = self.table.is_resident(&self.process_name);
        debug!(process = %self.process_name, resident, "residency sample");

        let step = self.tally.tick(resident, DayKey::today());
        if let Some(total_secs) = step.progress {
            info!(
                total = %format_duration(total_secs),
                "accumulated residency today"
            );
        }
        if let Some(flush) = step.flush {
            if let Err(err) = self.ledger.put(&flush.day, flush.total_secs) {
                warn!(error = %err, "failed to persist the attendance ledger");
            }
        }
    }
}
