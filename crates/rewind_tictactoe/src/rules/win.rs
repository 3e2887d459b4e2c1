//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The eight lines checked for three in a row.
///
/// Order matters: rows, then columns, then diagonals. The first match wins.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A decided board: who won and along which line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct WinResult {
    /// The player holding all three squares.
    winner: Player,
    /// The winning triple.
    line: [Position; 3],
}

impl WinResult {
    /// Returns true if `pos` is part of the winning line.
    pub fn contains(&self, pos: Position) -> bool {
        self.line.contains(&pos)
    }

    /// Winning triple as board indices.
    pub fn indices(&self) -> [usize; 3] {
        self.line.map(Position::to_index)
    }
}

/// Evaluates the board for three in a row.
///
/// Returns the first matching line in [`LINES`] order, or `None`.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Option<WinResult> {
    LINES.into_iter().find_map(|line @ [a, b, c]| {
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            sq.player().map(|winner| WinResult { winner, line })
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(player: Player, positions: &[Position]) -> Board {
        positions
            .iter()
            .fold(Board::new(), |board, pos| board.with(*pos, player))
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(evaluate(&Board::new()), None);
    }

    #[test]
    fn test_every_line_is_detected() {
        for line in LINES {
            for player in [Player::X, Player::O] {
                let board = board_with(player, &line);
                let win = evaluate(&board).expect("line should win");
                assert_eq!(*win.winner(), player);
                assert_eq!(*win.line(), line);
            }
        }
    }

    #[test]
    fn test_winner_diagonal_indices() {
        let board = board_with(
            Player::O,
            &[Position::TopRight, Position::Center, Position::BottomLeft],
        );
        let win = evaluate(&board).unwrap();
        assert_eq!(win.indices(), [2, 4, 6]);
        assert!(win.contains(Position::Center));
        assert!(!win.contains(Position::TopLeft));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = Board::new()
            .with(Position::TopLeft, Player::X)
            .with(Position::TopCenter, Player::O)
            .with(Position::TopRight, Player::X);
        assert_eq!(evaluate(&board), None);
    }

    #[test]
    fn test_rows_take_precedence_over_columns() {
        // Unreachable in play, but the first listed line must still win.
        let board = board_with(
            Player::X,
            &[
                Position::TopLeft,
                Position::TopCenter,
                Position::TopRight,
                Position::MiddleLeft,
                Position::BottomLeft,
            ],
        );
        let win = evaluate(&board).unwrap();
        assert_eq!(win.indices(), [0, 1, 2]);
    }
}
