//! Game state with snapshot history and time travel.

use super::invariants::{GameInvariants, InvariantSet};
use super::rules::{evaluate, is_draw};
use super::{
    Board, GameStatus, IgnoreReason, Move, MoveOrder, MoveOutcome, Player, Position, Snapshot,
    WinResult,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument, warn};

/// Why a saved history cannot become a [`GameState`].
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HistoryError {
    /// No snapshots at all.
    #[display("History has no snapshots")]
    Empty,
    /// Viewed index past the last snapshot.
    #[display("Current index {current} outside history of {len} snapshots")]
    CurrentOutOfRange {
        /// Requested index.
        current: usize,
        /// Number of snapshots.
        len: usize,
    },
    /// Snapshots that no sequence of legal moves produces.
    #[display("Inconsistent history: {details}")]
    Inconsistent {
        /// Violated invariants, joined.
        details: String,
    },
}

/// One entry of the move list as presented to the player.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct Step {
    /// History index.
    index: usize,
    /// "Game Start" or "Move #n".
    label: String,
    /// Where the move landed, if any.
    placed: Option<Move>,
    /// Whether this is the snapshot being viewed.
    is_current: bool,
}

/// A tic-tac-toe game with full history.
///
/// History is a list of immutable snapshots beginning with the empty board.
/// `current` points at the snapshot being viewed. Jumping only moves the
/// pointer; the next applied move drops everything after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    history: Vec<Snapshot>,
    current: usize,
}

impl GameState {
    /// Creates a new game with a single empty snapshot.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: vec![Snapshot::opening()],
            current: 0,
        }
    }

    /// Rebuilds a game from saved snapshots, viewing `current`.
    #[instrument(skip(history), fields(len = history.len()))]
    pub fn from_history(history: Vec<Snapshot>, current: usize) -> Result<Self, HistoryError> {
        if history.is_empty() {
            return Err(HistoryError::Empty);
        }
        if current >= history.len() {
            return Err(HistoryError::CurrentOutOfRange {
                current,
                len: history.len(),
            });
        }
        let game = Self { history, current };
        if let Err(violations) = GameInvariants::check_all(&game) {
            let details = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(HistoryError::Inconsistent { details });
        }
        debug!("History restored");
        Ok(game)
    }

    #[cfg(test)]
    pub(crate) fn from_parts(history: Vec<Snapshot>, current: usize) -> Self {
        Self { history, current }
    }

    /// Replaces this game with a fresh one.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        info!(discarded = self.history.len() - 1, "Restarting game");
        *self = Self::new();
    }

    /// Applies a move for the player to move at cell `cell` (0-8).
    ///
    /// Ignored when the viewed snapshot is decided, the cell is taken, or the
    /// index is off the board. Ignored moves leave the state untouched.
    #[instrument(skip(self), fields(current = self.current, len = self.history.len()))]
    pub fn apply_move(&mut self, cell: usize) -> MoveOutcome {
        let Some(position) = Position::from_index(cell) else {
            return self.ignore(IgnoreReason::OutOfBounds(cell));
        };

        let snapshot = self.current_snapshot();
        if evaluate(snapshot.board()).is_some() {
            return self.ignore(IgnoreReason::GameDecided);
        }
        if !snapshot.board().is_empty(position) {
            return self.ignore(IgnoreReason::SquareOccupied(position));
        }

        let mv = Move::new(self.next_player(), position);
        let next = snapshot.after(mv);

        let dropped = self.history.len() - 1 - self.current;
        if dropped > 0 {
            debug!(dropped, "Overwriting future snapshots");
        }
        self.history.truncate(self.current + 1);
        self.history.push(next);
        self.current = self.history.len() - 1;

        debug_assert!(
            GameInvariants::check_all(self).is_ok(),
            "game invariants violated after {}",
            mv
        );
        debug!(%mv, step = self.current, "Move applied");
        MoveOutcome::Applied(mv)
    }

    fn ignore(&self, reason: IgnoreReason) -> MoveOutcome {
        debug!(%reason, "Move ignored");
        MoveOutcome::Ignored(reason)
    }

    /// Views the snapshot at `index` without discarding anything.
    ///
    /// Returns false, leaving the state untouched, if `index` is not in history.
    #[instrument(skip(self), fields(len = self.history.len()))]
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.history.len() {
            warn!(index, "Jump target outside history");
            return false;
        }
        self.current = index;
        debug!(index, "Jumped");
        true
    }

    /// Board of the viewed snapshot.
    pub fn current_board(&self) -> &Board {
        self.current_snapshot().board()
    }

    /// The viewed snapshot.
    pub fn current_snapshot(&self) -> &Snapshot {
        &self.history[self.current]
    }

    /// Index of the viewed snapshot.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Player to move from the viewed snapshot.
    pub fn next_player(&self) -> Player {
        Player::to_move_after(self.current)
    }

    /// All snapshots, oldest first.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.history
    }

    /// Number of snapshots, including the opening board.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always false: history holds at least the opening board.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Winner of the viewed snapshot.
    pub fn winner(&self) -> Option<WinResult> {
        evaluate(self.current_board())
    }

    /// Status of the viewed snapshot.
    pub fn status(&self) -> GameStatus {
        let board = self.current_board();
        if is_draw(board) {
            return GameStatus::Draw;
        }
        match evaluate(board) {
            Some(win) => GameStatus::Won(win),
            None => GameStatus::InProgress {
                next: self.next_player(),
            },
        }
    }

    /// Label for the history entry at `index`.
    pub fn step_label(&self, index: usize) -> Option<String> {
        match index {
            0 => Some("Game Start".to_string()),
            n if n < self.history.len() => Some(format!("Move #{}", n)),
            _ => None,
        }
    }

    /// Label plus where the move landed, e.g. `Move #3: X at (row 2, col 1)`.
    pub fn step_detail(&self, index: usize) -> Option<String> {
        let label = self.step_label(index)?;
        Some(match self.history[index].placed() {
            Some(mv) => format!("{}: {}", label, mv),
            None => label,
        })
    }

    /// Every history entry in the requested order.
    #[instrument(skip(self))]
    pub fn steps(&self, order: MoveOrder) -> Vec<Step> {
        order
            .arrange(self.history.len())
            .into_iter()
            .filter_map(|index| {
                let label = self.step_label(index)?;
                Some(Step {
                    index,
                    label,
                    placed: *self.history[index].placed(),
                    is_current: index == self.current,
                })
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for GameState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Saved {
            history: Vec<Snapshot>,
            current: usize,
        }

        let saved = Saved::deserialize(deserializer)?;
        Self::from_history(saved.history, saved.current).map_err(serde::de::Error::custom)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::is_full;

    fn play(cells: &[usize]) -> GameState {
        let mut game = GameState::new();
        for &cell in cells {
            assert!(game.apply_move(cell).is_applied(), "cell {} rejected", cell);
        }
        game
    }

    #[test]
    fn test_new_game_has_one_empty_snapshot() {
        let game = GameState::new();
        assert_eq!(game.len(), 1);
        assert_eq!(game.current_index(), 0);
        assert_eq!(game.current_board(), &Board::new());
        assert_eq!(game.next_player(), Player::X);
    }

    #[test]
    fn test_apply_move_records_player_in_turn() {
        let game = play(&[4, 0]);
        let board = game.current_board();
        assert_eq!(board.get(Position::Center).player(), Some(Player::X));
        assert_eq!(board.get(Position::TopLeft).player(), Some(Player::O));
        assert_eq!(game.next_player(), Player::X);
    }

    #[test]
    fn test_out_of_bounds_is_ignored() {
        let mut game = play(&[0]);
        let before = game.clone();
        assert_eq!(
            game.apply_move(9),
            MoveOutcome::Ignored(IgnoreReason::OutOfBounds(9))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_jump_keeps_future_until_next_move() {
        let mut game = play(&[0, 1, 2]);
        assert!(game.jump_to(1));
        assert_eq!(game.len(), 4);
        assert_eq!(game.next_player(), Player::O);
        assert!(game.jump_to(3));
        assert_eq!(game.current_board().occupied(), 3);
    }

    #[test]
    fn test_jump_out_of_range_is_ignored() {
        let mut game = play(&[0]);
        assert!(!game.jump_to(2));
        assert_eq!(game.current_index(), 1);
    }

    #[test]
    fn test_status_transitions() {
        let mut game = GameState::new();
        assert_eq!(game.status().to_string(), "Next player: X");
        for cell in [0, 3, 1, 4, 2] {
            game.apply_move(cell);
        }
        assert_eq!(game.status().to_string(), "Winner: X");
        assert!(game.status().is_over());
    }

    #[test]
    fn test_draw_status() {
        // X O X / X O O / O X X
        let game = play(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(game.status(), GameStatus::Draw);
    }

    #[test]
    fn test_win_on_last_square_is_not_a_draw() {
        // X O X / O X O / O X X: the ninth mark completes the main diagonal.
        let game = play(&[0, 1, 2, 3, 4, 5, 7, 6, 8]);
        assert!(is_full(game.current_board()));
        assert!(matches!(game.status(), GameStatus::Won(win) if win.indices() == [0, 4, 8]));
    }

    #[test]
    fn test_step_labels_and_detail() {
        let game = play(&[4, 3]);
        assert_eq!(game.step_label(0).as_deref(), Some("Game Start"));
        assert_eq!(game.step_label(2).as_deref(), Some("Move #2"));
        assert_eq!(game.step_label(3), None);
        assert_eq!(
            game.step_detail(2).as_deref(),
            Some("Move #2: O at (row 2, col 1)")
        );
        assert_eq!(game.step_detail(0).as_deref(), Some("Game Start"));
    }

    #[test]
    fn test_steps_descending_marks_current() {
        let mut game = play(&[0, 1]);
        game.jump_to(1);
        let steps = game.steps(MoveOrder::Descending);
        let indices: Vec<_> = steps.iter().map(|s| *s.index()).collect();
        assert_eq!(indices, vec![2, 1, 0]);
        assert!(*steps[1].is_current());
        assert!(!*steps[0].is_current());
    }

    const OPENING: &str = r#"
[[history]]
board = { squares = ["Empty", "Empty", "Empty", "Empty", "Empty", "Empty", "Empty", "Empty", "Empty"] }
"#;

    #[test]
    fn test_deserialize_rejects_empty_history() {
        let err = toml::from_str::<GameState>("history = []\ncurrent = 3").unwrap_err();
        assert!(err.to_string().contains("History has no snapshots"), "{}", err);
    }

    #[test]
    fn test_deserialize_rejects_current_past_history() {
        let text = format!("current = 1\n{}", OPENING);
        let err = toml::from_str::<GameState>(&text).unwrap_err();
        assert!(err.to_string().contains("outside history"), "{}", err);
    }

    #[test]
    fn test_deserialize_accepts_opening_board() {
        let text = format!("current = 0\n{}", OPENING);
        let game: GameState = toml::from_str(&text).unwrap();
        assert_eq!(game, GameState::new());
    }

    #[test]
    fn test_from_history_checks_every_rule() {
        assert_eq!(GameState::from_history(vec![], 0), Err(HistoryError::Empty));
        assert_eq!(
            GameState::from_history(vec![Snapshot::opening()], 2),
            Err(HistoryError::CurrentOutOfRange { current: 2, len: 1 })
        );
        let skipped = vec![Snapshot::opening(), Snapshot::opening()];
        assert!(matches!(
            GameState::from_history(skipped, 0),
            Err(HistoryError::Inconsistent { .. })
        ));

        let game = play(&[4, 0, 8]);
        let restored = GameState::from_history(game.snapshots().to_vec(), 1).unwrap();
        assert_eq!(restored.len(), 4);
        assert_eq!(restored.next_player(), Player::O);
    }

    #[test]
    fn test_restart_clears_history() {
        let mut game = play(&[0, 1, 2]);
        game.restart();
        assert_eq!(game, GameState::new());
    }
}
