//! Rewind - unified CLI.

use anyhow::{Context, Result};
use clap::Parser;
use rewind::{Cli, Command, Script, Settings, tui};
use std::fs::File;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;

    match cli.command() {
        Command::Play { order, log_file } => {
            let settings = settings.with_overrides(order, log_file);
            init_file_logging(&settings)?;
            settings.log_summary();
            tui::run_tui(&settings)
        }
        Command::Replay {
            cells,
            jump,
            then,
            order,
        } => {
            init_stderr_logging();
            settings.log_summary();
            let order = order.unwrap_or(*settings.move_order());
            let replay = Script { cells, jump, then }.run();
            for note in &replay.ignored {
                eprintln!("ignored {}", note);
            }
            print!("{}", replay.render(order, *settings.show_locations()));
            Ok(())
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Logs to a file so output does not interfere with the TUI.
fn init_file_logging(settings: &Settings) -> Result<()> {
    let path = settings.log_file();
    let log_file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    info!(log_file = %path.display(), "Logging initialized");
    Ok(())
}

/// Logs to stderr, keeping stdout for the replay output.
fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .try_init();
    debug!("Logging initialized");
}
