//! Snapshot comparison engine.
//!
//! Compares a fresh snapshot against the baseline:
//! - Buckets present on both sides cancel fingerprints one-for-one
//! - Whatever survives on either side marks its (table, record, column)
//! - One alert per marked triple, deduplicated across both sides
//!
//! Alerts are per column, not per fingerprint. A column with one changed
//! script out of several is reported once.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::scan::fingerprint::Fingerprint;
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Alert {
    pub table: String,
    pub record: String,
    pub column: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Table:'{}', Record:'{}', Column:'{}'",
            self.table, self.record, self.column
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiffResult {
    /// Baseline fingerprints with no counterpart in the current scan.
    pub remaining_baseline: Snapshot,
    /// Current fingerprints with no counterpart in the baseline.
    pub remaining_current: Snapshot,
    pub alerts: Vec<Alert>,
}

impl DiffResult {
    pub fn has_changes(&self) -> bool {
        !self.alerts.is_empty()
    }
}

/// Multiset difference of two buckets. Each fingerprint in `baseline` that
/// also occurs in `current` removes exactly one occurrence from each side.
/// Returns (baseline leftovers, current leftovers).
fn cancel(baseline: &[Fingerprint], current: &[Fingerprint]) -> (Vec<Fingerprint>, Vec<Fingerprint>) {
    let mut current_left = current.to_vec();
    let mut baseline_left = Vec::new();

    for hash in baseline {
        match current_left.iter().position(|h| h == hash) {
            Some(pos) => {
                current_left.remove(pos);
            }
            None => baseline_left.push(hash.clone()),
        }
    }

    (baseline_left, current_left)
}

pub fn compare_snapshots(current: &Snapshot, baseline: &Snapshot) -> DiffResult {
    let mut remaining_baseline = Snapshot::new();
    let mut remaining_current = Snapshot::new();

    for (table, record, column, hashes) in baseline.triples() {
        match current.bucket(table, record, column) {
            Some(current_hashes) => {
                let (base_left, _) = cancel(hashes, current_hashes);
                remaining_baseline.insert_bucket(table, record, column, base_left);
            }
            None => remaining_baseline.insert_bucket(table, record, column, hashes.to_vec()),
        }
    }

    for (table, record, column, hashes) in current.triples() {
        match baseline.bucket(table, record, column) {
            Some(baseline_hashes) => {
                let (_, current_left) = cancel(baseline_hashes, hashes);
                remaining_current.insert_bucket(table, record, column, current_left);
            }
            None => remaining_current.insert_bucket(table, record, column, hashes.to_vec()),
        }
    }

    if remaining_baseline.is_empty() && remaining_current.is_empty() {
        return DiffResult::default();
    }

    let alerts: BTreeSet<Alert> = remaining_baseline
        .triples()
        .chain(remaining_current.triples())
        .map(|(table, record, column, _)| Alert {
            table: table.to_string(),
            record: record.to_string(),
            column: column.to_string(),
        })
        .collect();

    DiffResult {
        remaining_baseline,
        remaining_current,
        alerts: alerts.into_iter().collect(),
    }
}
