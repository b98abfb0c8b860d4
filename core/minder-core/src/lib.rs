//! # minder-core
//!
//! Core library for minder: the daily attendance ledger and the watch state
//! machines that decide when the target application gets relaunched.
//!
//! ## Design Principles
//!
//! - **Synchronous**: no async runtime. The daemon schedules the 1-second
//!   loops; this crate only advances state one tick at a time.
//! - **Deterministic**: no platform calls here. Window, process-table and
//!   automation access live behind traits in the daemon crate, so every
//!   state machine in this crate is testable tick by tick.
//! - **Loud at startup, quiet at runtime**: a malformed ledger refuses to
//!   load; a failed flush inside a running loop is the caller's to log.

pub mod clock;
pub mod config;
pub mod countdown;
pub mod error;
pub mod focus;
pub mod ledger;
pub mod tally;

pub use clock::{format_duration, parse_duration, DayKey};
pub use config::{load_config, WatchConfig};
pub use countdown::RelaunchCountdown;
pub use error::{MinderError, Result};
pub use focus::{classify_title, FocusState, WatchEvent};
pub use ledger::DayLedger;
pub use tally::{LedgerFlush, ResidencyTally, TallyTick};
