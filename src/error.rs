use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("no database configured (use --database or set `database` in the config file)")]
    MissingDatabase,

    #[error("could not determine a default baseline location (use --baseline)")]
    MissingBaseline,

    #[error("invalid scan target: {0}")]
    Target(String),
}

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("failed to open database {path}: {source}")]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("query on table '{table}' failed: {source}")]
    Query {
        table: String,
        source: rusqlite::Error,
    },

    #[error("invalid script pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no baseline found at {0}; run with --set-baseline first")]
    Missing(PathBuf),

    #[error("failed to access baseline {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("baseline {path} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize baseline: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("no notification recipients configured")]
    NoRecipients,

    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("failed to hand message to {program}: {source}")]
    Io {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} exited with {status}")]
    Rejected { program: String, status: std::process::ExitStatus },
}

/// Fatal errors for one invocation. Notification failures are not part of
/// this; they are reported but never abort a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
