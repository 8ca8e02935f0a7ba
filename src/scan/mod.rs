pub mod fingerprint;
pub mod source;
pub mod targets;

use crate::error::ScanError;
use crate::snapshot::{Snapshot, SnapshotBuilder};
use fingerprint::ScriptExtractor;
use source::RowSource;
use targets::ScanTarget;

pub struct ScanResult {
    pub snapshot: Snapshot,
    pub rows_examined: usize,
    pub duration_ms: u128,
}

/// Scan every target through `source`, stopping at the first query failure.
pub fn run(source: &dyn RowSource, targets: &[ScanTarget]) -> Result<ScanResult, ScanError> {
    let start = std::time::Instant::now();
    let extractor = ScriptExtractor::new()?;
    let mut builder = SnapshotBuilder::new(&extractor);
    let mut rows_examined = 0;

    for target in targets {
        let rows = source.fetch(target)?;
        log::info!(
            "{}: {} candidate values in '{}'",
            source.name(),
            rows.len(),
            target.table
        );
        rows_examined += rows.len();
        builder.extend(&rows);
    }

    let snapshot = builder.finish();
    let duration_ms = start.elapsed().as_millis();
    log::info!(
        "scan complete: {} fingerprints across {} records in {duration_ms}ms",
        snapshot.fingerprint_count(),
        snapshot.record_count()
    );

    Ok(ScanResult {
        snapshot,
        rows_examined,
        duration_ms,
    })
}
