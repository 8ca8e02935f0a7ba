use std::process::ExitCode;

use clap::Parser;
use scriptwatch::app;
use scriptwatch::cli::Cli;
use scriptwatch::config::Config;
use scriptwatch::error::Error;
use scriptwatch::notify::Notifier;
use scriptwatch::scan::source::SqliteSource;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = Config::from_cli(cli)?;
    log::debug!(
        "database: {}, baseline: {}",
        config.database.display(),
        config.baseline.display()
    );

    let source = SqliteSource::open(&config.database)?;
    let notifier = config.notifier.as_ref().map(|n| n as &dyn Notifier);
    app::run(&config, &source, notifier)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
