use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "scriptwatch")]
#[command(about = "Scans database text columns for new or modified <script> tags")]
#[command(version)]
pub struct Cli {
    /// Save the current scan as the new baseline instead of comparing
    #[arg(long, default_value_t = false)]
    pub set_baseline: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// SQLite database to scan
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Baseline file location
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Do not send alert mail even if notification is configured
    #[arg(long, default_value_t = false)]
    pub no_notify: bool,

    /// Show detailed output including scan statistics
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}
