//! History consistency invariant: snapshot index matches occupied squares.

use super::Invariant;
use crate::GameState;

/// Invariant: snapshot `k` has exactly `k` occupied squares.
///
/// Only the opening snapshot lacks a move; every later one records the move
/// that produced it.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(game: &GameState) -> bool {
        !game.snapshots().is_empty()
            && game.current_index() < game.len()
            && game
                .snapshots()
                .iter()
                .enumerate()
                .all(|(k, snapshot)| {
                    snapshot.board().occupied() == k && snapshot.placed().is_some() == (k > 0)
                })
    }

    fn description() -> &'static str {
        "Snapshot index matches number of occupied squares"
    }
}
