//! Merge-request watcher CLI.

use std::io::{self, IsTerminal};
use std::time::Duration;

use clap::{ColorChoice, Parser};
use tracing::warn;

use mrwatch_cli::cli::{Cli, Command, LogFormatArg};
use mrwatch_cli::config::Config;
use mrwatch_cli::daemon::Daemon;
use mrwatch_cli::logging::{LogConfig, LogFormat, init_logging};
use mrwatch_cli::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    load_env(&cli);
    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Command::Run(args) => {
            let mut config = Config::from_env()?;
            if let Some(seconds) = args.interval {
                config.iteration_interval = Duration::from_secs(seconds);
            }
            let daemon = Daemon::new(config)?;
            daemon.run_forever()
        }
        Command::Once => {
            let config = Config::from_env()?;
            let daemon = Daemon::new(config)?;
            let summary = daemon.run_once()?;
            print_summary(&summary);
            Ok(0)
        }
    }
}

fn load_env(cli: &Cli) {
    let result = match &cli.env_file {
        Some(path) => dotenvy::from_path(path).map(|()| path.clone()),
        None => dotenvy::dotenv(),
    };
    if let Err(error) = result {
        warn!(%error, "no environment file loaded");
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
