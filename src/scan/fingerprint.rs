//! Script block extraction and fingerprinting.
//!
//! Finds every `<script ...>...</script>` block in a text value and reduces
//! each one to a SHA-256 content digest. Matching is case-insensitive, spans
//! lines, and is non-greedy so adjacent blocks come out separately.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const SCRIPT_PATTERN: &str = r"(?is)<script.*?</script>";

/// Hex digest identifying one matched script block.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(block: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(block.as_bytes());
        Fingerprint(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Fingerprint(value.to_string())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct ScriptExtractor {
    pattern: Regex,
}

impl ScriptExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(ScriptExtractor {
            pattern: Regex::new(SCRIPT_PATTERN)?,
        })
    }

    /// Fingerprints of all script blocks in `text`, in order of appearance.
    /// Identical blocks each contribute their own entry.
    pub fn fingerprints(&self, text: &str) -> Vec<Fingerprint> {
        self.pattern
            .find_iter(text)
            .map(|m| Fingerprint::of(m.as_str()))
            .collect()
    }
}
