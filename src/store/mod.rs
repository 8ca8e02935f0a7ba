//! Baseline persistence and comparison.
//!
//! The baseline is a single JSON file holding the snapshot from the last
//! explicit save. It is only ever replaced by `save_baseline`; checking
//! reads it and never writes.

pub mod baseline;
pub mod diff;

pub use baseline::{check_against_baseline, save_baseline, BaselineFile};
pub use diff::{compare_snapshots, Alert, DiffResult};
