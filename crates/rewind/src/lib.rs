//! Rewind - tic-tac-toe in the terminal with move history and time travel.
//!
//! # Architecture
//!
//! - **Game**: pure rules and snapshot history live in [`rewind_tictactoe`]
//! - **TUI**: interactive board and move list ([`tui`])
//! - **Replay**: scripted, non-interactive sessions ([`replay`])
//! - **Config**: settings file and command-line overrides ([`config`], [`cli`])

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod replay;
pub mod tui;

pub use cli::{Cli, Command};
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, Settings};
pub use replay::{Replay, Script};
