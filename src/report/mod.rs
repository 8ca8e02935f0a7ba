pub mod json;
pub mod text;

use crate::config::Config;
use crate::scan::ScanResult;
use crate::store::diff::DiffResult;

/// What a run produced, ready for display.
#[derive(Debug)]
pub enum Outcome {
    Saved { fingerprints: usize, records: usize },
    Checked(DiffResult),
}

pub fn print(outcome: &Outcome, scan: &ScanResult, config: &Config) {
    if config.json_output {
        println!("{}", json::render(outcome));
    } else {
        print!("{}", text::render(outcome));
        if config.verbose {
            eprint!("{}", text::render_scan_info(scan, outcome));
        }
    }
}
