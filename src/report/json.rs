//! JSON output for run outcomes.
//!
//! Serializes the outcome for scripting and piping.

use serde_json::json;

use super::Outcome;

pub fn render(outcome: &Outcome) -> String {
    let value = match outcome {
        Outcome::Saved { fingerprints, records } => json!({
            "status": "saved",
            "fingerprints": fingerprints,
            "records": records,
        }),
        Outcome::Checked(result) => json!({
            "status": "checked",
            "changed": result.has_changes(),
            "alerts": result
                .alerts
                .iter()
                .map(|a| json!({
                    "table": a.table,
                    "record": a.record,
                    "column": a.column,
                    "message": a.to_string(),
                }))
                .collect::<Vec<_>>(),
        }),
    };
    value.to_string()
}
