//! Non-interactive play: apply a move list and print where it leads.

use rewind_tictactoe::{GameState, MoveOrder, MoveOutcome};
use tracing::{info, instrument, warn};

/// A scripted session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    /// Cells played from the opening board.
    pub cells: Vec<usize>,
    /// Snapshot to return to afterwards.
    pub jump: Option<usize>,
    /// Cells played after the jump.
    pub then: Vec<usize>,
}

/// Outcome of running a [`Script`].
#[derive(Debug, Clone)]
pub struct Replay {
    /// Game after the script.
    pub game: GameState,
    /// One note per request that left the game unchanged.
    pub ignored: Vec<String>,
}

impl Script {
    /// Plays the script on a fresh game.
    #[instrument(skip(self), fields(cells = self.cells.len(), jump = ?self.jump, then = self.then.len()))]
    pub fn run(&self) -> Replay {
        let mut game = GameState::new();
        let mut ignored = Vec::new();

        play_cells(&mut game, &self.cells, &mut ignored);
        if let Some(index) = self.jump {
            if !game.jump_to(index) {
                ignored.push(format!(
                    "jump {}: history has {} snapshots",
                    index,
                    game.len()
                ));
            }
            play_cells(&mut game, &self.then, &mut ignored);
        }

        info!(len = game.len(), status = %game.status(), "Script finished");
        Replay { game, ignored }
    }
}

fn play_cells(game: &mut GameState, cells: &[usize], ignored: &mut Vec<String>) {
    for &cell in cells {
        if let MoveOutcome::Ignored(reason) = game.apply_move(cell) {
            warn!(cell, %reason, "Move ignored");
            ignored.push(format!("cell {}: {}", cell, reason));
        }
    }
}

impl Replay {
    /// Renders board, status and move list as plain text.
    ///
    /// With `show_locations`, each move entry also names the cell it took.
    pub fn render(&self, order: MoveOrder, show_locations: bool) -> String {
        let mut out = String::new();
        out.push_str(&self.game.current_board().display());
        out.push_str("\n\n");
        out.push_str(&self.game.status().to_string());
        out.push_str("\n\nMoves:\n");
        for step in self.game.steps(order) {
            let marker = if *step.is_current() { '>' } else { ' ' };
            let text = if show_locations {
                self.game
                    .step_detail(*step.index())
                    .unwrap_or_else(|| step.label().clone())
            } else {
                step.label().clone()
            };
            out.push_str(&format!("{} {}\n", marker, text));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_overwrite_script() {
        let replay = Script {
            cells: vec![0, 1, 2],
            jump: Some(0),
            then: vec![4],
        }
        .run();
        assert!(replay.ignored.is_empty());
        assert_eq!(replay.game.len(), 2);

        let text = replay.render(MoveOrder::Ascending, true);
        assert!(text.starts_with("1|2|3\n-+-+-\n4|X|6"));
        assert!(text.contains("Next player: O"));
        assert!(text.contains("> Move #1: X at (row 2, col 2)"));
    }

    #[test]
    fn test_render_without_locations_shows_labels_only() {
        let replay = Script {
            cells: vec![4, 0],
            ..Script::default()
        }
        .run();
        let text = replay.render(MoveOrder::Ascending, false);
        assert!(text.ends_with("Moves:\n  Game Start\n  Move #1\n> Move #2\n"), "{}", text);
        assert!(!text.contains("row"));
    }

    #[test]
    fn test_ignored_requests_are_reported() {
        let replay = Script {
            cells: vec![4, 4, 11],
            jump: Some(7),
            then: vec![],
        }
        .run();
        assert_eq!(replay.game.len(), 2);
        assert_eq!(replay.ignored.len(), 3);
        assert_eq!(replay.ignored[0], "cell 4: Center is already occupied");
        assert!(replay.ignored[2].starts_with("jump 7"));
    }
}
