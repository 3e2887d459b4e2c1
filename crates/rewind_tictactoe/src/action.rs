//! Moves and what became of them.
//!
//! An ignored move is not an error: the state is left exactly as it was and
//! the reason is only reported so callers can log or explain it.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The player making the move.
    pub player: Player,
    /// The position where the player places their mark.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at (row {}, col {})",
            self.player,
            self.position.row(),
            self.position.col()
        )
    }
}

/// Why a move request left the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IgnoreReason {
    /// The viewed snapshot already has a winner.
    #[display("Game is already decided")]
    GameDecided,

    /// The square at the position is already occupied.
    #[display("{} is already occupied", _0)]
    SquareOccupied(Position),

    /// The cell index is not on the board.
    #[display("Cell {} is off the board", _0)]
    OutOfBounds(usize),
}

/// Result of asking the game to apply a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A new snapshot was appended.
    Applied(Move),
    /// Nothing changed.
    Ignored(IgnoreReason),
}

impl MoveOutcome {
    /// Returns true if the move produced a new snapshot.
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied(_))
    }
}
