//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::Invariant;
use crate::{GameState, Player};

/// Invariant: the move behind snapshot `k` was made by X iff `k` is odd.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(game: &GameState) -> bool {
        game.snapshots()
            .iter()
            .enumerate()
            .skip(1)
            .all(|(k, snapshot)| {
                snapshot
                    .placed()
                    .is_some_and(|mv| mv.player == Player::to_move_after(k - 1))
            })
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}
