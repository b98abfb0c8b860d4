//! # minder-daemon
//!
//! The watch daemon. Samples foreground focus once per second and records
//! per-day process residency into the attendance ledger; a target left
//! unfocused past the timeout gets relaunched into the foreground.
//!
//! The binary wires the real desktop adapters into the three service loops;
//! integration tests drive the same loops with fake adapters.

pub mod classifier;
pub mod controller;
pub mod platform;
pub mod residency;
pub mod watcher;
