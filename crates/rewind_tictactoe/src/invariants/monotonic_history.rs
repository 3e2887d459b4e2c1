//! Monotonic history invariant: each snapshot adds exactly one mark.

use super::Invariant;
use crate::{GameState, Square};

/// Invariant: every snapshot extends the previous one by a single mark.
///
/// Marks are never removed or changed, and the added mark is the one the
/// snapshot records as its move.
pub struct MonotonicHistoryInvariant;

impl Invariant<GameState> for MonotonicHistoryInvariant {
    fn holds(game: &GameState) -> bool {
        let snapshots = game.snapshots();

        if snapshots.first().map(|s| s.board().occupied()) != Some(0) {
            return false;
        }

        snapshots.windows(2).all(|pair| {
            let (prev, next) = (pair[0].board(), pair[1].board());
            let Some(mv) = pair[1].placed() else {
                return false;
            };
            let kept = prev
                .squares()
                .iter()
                .zip(next.squares())
                .all(|(before, after)| *before == Square::Empty || before == after);

            kept && prev.is_empty(mv.position)
                && next.get(mv.position) == Square::Occupied(mv.player)
                && next.occupied() == prev.occupied() + 1
        })
    }

    fn description() -> &'static str {
        "Each snapshot adds exactly one mark to the previous board"
    }
}
