//! Plain text rendering.
//!
//! Silent when a check finds nothing; otherwise one line per alert under a
//! headline, matching the mail body.

use crate::notify::ALERT_HEADLINE;
use crate::scan::ScanResult;
use super::Outcome;

pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Saved { fingerprints, records } => {
            format!("Baseline successfully saved ({fingerprints} fingerprints in {records} records)\n")
        }
        Outcome::Checked(result) if result.alerts.is_empty() => String::new(),
        Outcome::Checked(result) => {
            let mut output = format!("{ALERT_HEADLINE}\n");
            for alert in &result.alerts {
                output.push_str(&format!("{alert}\n"));
            }
            output
        }
    }
}

pub fn render_scan_info(scan: &ScanResult, outcome: &Outcome) -> String {
    let snapshot = &scan.snapshot;
    let mut output = format!(
        "\nscanned {} candidate values in {:.2}s\n",
        scan.rows_examined,
        scan.duration_ms as f64 / 1000.0
    );
    output.push_str(&format!(
        "found {} fingerprints in {} records across {} tables\n",
        snapshot.fingerprint_count(),
        snapshot.record_count(),
        snapshot.table_count()
    ));

    if let Outcome::Checked(result) = outcome {
        if result.has_changes() {
            output.push_str(&format!(
                "unmatched: {} baseline, {} current\n",
                result.remaining_baseline.fingerprint_count(),
                result.remaining_current.fingerprint_count()
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::test_support::snapshot;
    use crate::store::diff::compare_snapshots;

    #[test]
    fn saved_confirmation() {
        let text = render(&Outcome::Saved { fingerprints: 3, records: 2 });
        assert_eq!(text, "Baseline successfully saved (3 fingerprints in 2 records)\n");
    }

    #[test]
    fn no_changes_prints_nothing() {
        let s = snapshot(&[("t", "1", "c", &["a"])]);
        assert_eq!(render(&Outcome::Checked(compare_snapshots(&s, &s))), "");
    }

    #[test]
    fn alerts_listed_under_headline() {
        let baseline = snapshot(&[("t", "1", "c", &["a"])]);
        let current = snapshot(&[("t", "1", "c", &["b"]), ("t", "2", "c", &["x"])]);

        let text = render(&Outcome::Checked(compare_snapshots(&current, &baseline)));

        assert_eq!(
            text,
            "New or modified script in the following records:\n\
             Table:'t', Record:'1', Column:'c'\n\
             Table:'t', Record:'2', Column:'c'\n"
        );
    }

    #[test]
    fn scan_info_reports_leftovers() {
        let baseline = snapshot(&[("t", "1", "c", &["a", "a"])]);
        let current = snapshot(&[("t", "1", "c", &["a"])]);
        let scan = ScanResult {
            snapshot: current.clone(),
            rows_examined: 4,
            duration_ms: 1500,
        };

        let info = render_scan_info(&scan, &Outcome::Checked(compare_snapshots(&current, &baseline)));

        assert!(info.contains("scanned 4 candidate values in 1.50s"));
        assert!(info.contains("found 1 fingerprints in 1 records across 1 tables"));
        assert!(info.contains("unmatched: 1 baseline, 0 current"));
    }
}
