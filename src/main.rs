mod catalog;
mod cli;
mod config;
mod display;
mod error;
mod generation;
mod ui;

#[cfg(test)]
mod test_support;

use clap::Parser;
use cli::{Cli, Commands};
use error::{BookclubError, ExitStatus};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    setup_logging(cli.verbose, cli.quiet, cli.log_format.as_deref());
    ui::set_quiet_mode(cli.quiet);

    match run_command(cli).await {
        Ok(status) => status.into(),
        Err(e) => {
            tracing::debug!("Command failed: {}", e);
            ui::print_error(&e.user_message());
            e.exit_status().into()
        }
    }
}

async fn run_command(cli: Cli) -> Result<ExitStatus, BookclubError> {
    let Cli {
        command,
        config: config_path,
        ..
    } = cli;

    // Config subcommands must work before a valid config exists
    if let Some(Commands::Config { command }) = command {
        cli::run_config(command, config_path.as_deref())?;
        return Ok(ExitStatus::Success);
    }

    let config = config::load_config(config_path.as_deref())?;
    ui::set_theme(config.ui.theme);

    match command {
        Some(Commands::Genres) => {
            cli::run_genres();
            Ok(ExitStatus::Success)
        }

        Some(Commands::Search {
            genre,
            limit,
            json,
            no_descriptions,
        }) => cli::run_search(&config, genre, limit, json, no_descriptions).await,

        Some(Commands::Analyze {
            genre,
            book,
            kind,
            limit,
        }) => cli::run_analyze(&config, genre, book, kind, limit).await,

        Some(Commands::Check) => cli::run_check(&config).await,

        Some(Commands::Config { .. }) => Ok(ExitStatus::Success),

        None => {
            if ui::is_interactive() {
                cli::run_session(&config).await
            } else {
                use clap::CommandFactory;
                let mut cmd = Cli::command();
                cmd.print_help().ok();
                Ok(ExitStatus::Success)
            }
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool, format: Option<&str>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        Some("json") => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().without_time().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}
