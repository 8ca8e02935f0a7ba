use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::notify::{parse_recipients, SendmailNotifier};
use crate::scan::targets::{default_targets, ScanTarget};
use crate::store::baseline;

const DEFAULT_SENDMAIL: &str = "/usr/sbin/sendmail";
const DEFAULT_FROM_NAME: &str = "Security Scan";

/// Recipients may be written as "a@x, b@y" or as a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    Joined(String),
    List(Vec<String>),
}

impl Recipients {
    fn to_vec(&self) -> Vec<String> {
        match self {
            Recipients::Joined(s) => parse_recipients(s),
            Recipients::List(list) => list.iter().flat_map(|s| parse_recipients(s)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotifyFileConfig {
    pub sendmail: Option<String>,
    pub from_name: Option<String>,
    pub from_email: Option<String>,
    pub recipients: Option<Recipients>,
}

/// Contents of config.toml. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub database: Option<PathBuf>,
    pub baseline: Option<PathBuf>,
    pub table_prefix: Option<String>,
    pub notify: Option<NotifyFileConfig>,
    pub targets: Option<Vec<ScanTarget>>,
}

impl FileConfig {
    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path`. A missing file is only an error when `required` is set.
    pub fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text, path),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Default config file (~/.config/scriptwatch/config.toml or platform equivalent)
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "scriptwatch")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub struct Config {
    pub database: PathBuf,
    pub baseline: PathBuf,
    pub targets: Vec<ScanTarget>,
    pub notifier: Option<SendmailNotifier>,
    pub set_baseline: bool,
    pub json_output: bool,
    pub verbose: bool,
}

impl Config {
    pub fn from_cli(args: &Cli) -> Result<Self, ConfigError> {
        let file = match (&args.config, default_config_path()) {
            (Some(path), _) => FileConfig::load(path, true)?,
            (None, Some(path)) => FileConfig::load(&path, false)?,
            (None, None) => FileConfig::default(),
        };
        Self::resolve(args, file)
    }

    /// Layers CLI flags over file values over built-in defaults.
    pub fn resolve(args: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let database = args
            .database
            .clone()
            .or(file.database)
            .ok_or(ConfigError::MissingDatabase)?;

        let baseline = args
            .baseline
            .clone()
            .or(file.baseline)
            .or_else(baseline::default_path)
            .ok_or(ConfigError::MissingBaseline)?;

        let prefix = file.table_prefix.unwrap_or_default();
        let targets = file
            .targets
            .unwrap_or_else(default_targets)
            .iter()
            .map(|t| t.with_prefix(&prefix))
            .collect::<Vec<_>>();
        if targets.is_empty() {
            return Err(ConfigError::Target("no scan targets configured".into()));
        }
        for (idx, target) in targets.iter().enumerate() {
            target.validate()?;
            if targets[..idx].iter().any(|t| t.table == target.table) {
                return Err(ConfigError::Target(format!(
                    "table '{}' configured more than once",
                    target.table
                )));
            }
        }

        let notifier = if args.no_notify {
            None
        } else {
            file.notify.and_then(notifier_from)
        };

        Ok(Config {
            database,
            baseline,
            targets,
            notifier,
            set_baseline: args.set_baseline,
            json_output: args.json,
            verbose: args.verbose,
        })
    }
}

fn notifier_from(file: NotifyFileConfig) -> Option<SendmailNotifier> {
    let recipients = file.recipients.map(|r| r.to_vec()).unwrap_or_default();
    if recipients.is_empty() {
        return None;
    }

    let from_email = file
        .from_email
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| recipients[0].clone());

    Some(SendmailNotifier {
        program: file.sendmail.unwrap_or_else(|| DEFAULT_SENDMAIL.to_string()),
        from_name: file
            .from_name
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| DEFAULT_FROM_NAME.to_string()),
        from_email,
        recipients,
    })
}
