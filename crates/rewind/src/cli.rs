//! Command-line interface for rewind.

use clap::{Parser, Subcommand};
use rewind_tictactoe::MoveOrder;
use std::path::PathBuf;

/// Rewind - tic-tac-toe with move history and time travel
#[derive(Parser, Debug)]
#[command(name = "rewind")]
#[command(about = "Tic-tac-toe with move history and time travel", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (defaults to ./rewind.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play {
        /// Initial order of the move list (asc or desc)
        #[arg(long)]
        order: Option<MoveOrder>,

        /// Log file for the session
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Apply moves without a UI and print the result
    Replay {
        /// Cells to play in order (0-8, row-major)
        #[arg(required = true)]
        cells: Vec<usize>,

        /// Snapshot to jump back to after the moves
        #[arg(long)]
        jump: Option<usize>,

        /// Cells to play after the jump
        #[arg(long, num_args = 1.., requires = "jump")]
        then: Vec<usize>,

        /// Order of the printed move list (asc or desc)
        #[arg(long)]
        order: Option<MoveOrder>,
    },
}

impl Cli {
    /// The chosen command, with `play` as the default.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Play {
            order: None,
            log_file: None,
        })
    }
}
