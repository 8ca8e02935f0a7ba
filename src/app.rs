//! One invocation: scan, then either save the baseline or check against it,
//! print the outcome and mail any alerts.

use crate::config::Config;
use crate::error::Error;
use crate::notify::{Message, Notifier};
use crate::report::{self, Outcome};
use crate::scan::{self, source::RowSource};
use crate::store::{check_against_baseline, save_baseline, BaselineFile};

fn notify(notifier: Option<&dyn Notifier>, outcome: &Outcome) {
    let Outcome::Checked(result) = outcome else { return };
    if !result.has_changes() {
        return;
    }

    let Some(notifier) = notifier else {
        log::info!("notification not configured, {} alerts not mailed", result.alerts.len());
        return;
    };

    // reported only, never changes the exit status
    if let Err(e) = notifier.send(&Message::for_alerts(&result.alerts)) {
        log::warn!("alert notification failed: {e}");
        eprintln!("warning: failed to send alert notification: {e}");
    }
}

/// Alerts are a normal outcome; only configuration, query and baseline
/// storage failures come back as `Err`.
pub fn run(
    config: &Config,
    source: &dyn RowSource,
    notifier: Option<&dyn Notifier>,
) -> Result<Outcome, Error> {
    let scan_result = scan::run(source, &config.targets)?;
    let store = BaselineFile::new(&config.baseline);

    let outcome = if config.set_baseline {
        save_baseline(&store, &scan_result.snapshot)?;
        Outcome::Saved {
            fingerprints: scan_result.snapshot.fingerprint_count(),
            records: scan_result.snapshot.record_count(),
        }
    } else {
        Outcome::Checked(check_against_baseline(&store, &scan_result.snapshot)?)
    };

    report::print(&outcome, &scan_result, config);
    notify(notifier, &outcome);
    Ok(outcome)
}
