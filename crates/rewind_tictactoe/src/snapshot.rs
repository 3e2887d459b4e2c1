//! Immutable board snapshots.

use super::{Board, Move};
use serde::{Deserialize, Serialize};

/// The board at one point in history, plus the move that produced it.
///
/// The opening snapshot has no move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Snapshot {
    /// Board after the move.
    board: Board,
    /// Move that led here.
    placed: Option<Move>,
}

impl Snapshot {
    /// The empty board every game starts from.
    pub fn opening() -> Self {
        Self {
            board: Board::new(),
            placed: None,
        }
    }

    /// Snapshot following `self` after `mv` is played.
    pub fn after(&self, mv: Move) -> Self {
        Self {
            board: self.board.with(mv.position, mv.player),
            placed: Some(mv),
        }
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::opening()
    }
}
