//! Game status as shown to the player.

use super::{Player, WinResult};
use serde::{Deserialize, Serialize};

/// Status of the viewed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress {
        /// Player to move.
        next: Player,
    },
    /// Game ended in a win.
    Won(WinResult),
    /// Board is full with no winner.
    Draw,
}

impl GameStatus {
    /// Returns true once no more moves can be played from here.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress { next } => write!(f, "Next player: {}", next),
            GameStatus::Won(win) => write!(f, "Winner: {}", win.winner()),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}
