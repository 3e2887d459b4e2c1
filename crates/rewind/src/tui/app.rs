//! Application state and key handling.
//!
//! Everything here is independent of the terminal so it can be driven
//! directly from tests.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use rewind_tictactoe::{GameState, MoveOrder, MoveOutcome, Position, Step};
use tracing::{debug, info, instrument};

use crate::config::Settings;

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Arrow keys move the board cursor.
    #[default]
    Board,
    /// Arrow keys move through the move list.
    History,
}

impl Focus {
    /// Toggles between `Board` and `History`.
    pub fn toggle(self) -> Self {
        match self {
            Self::Board => Self::History,
            Self::History => Self::Board,
        }
    }
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep running.
    Stay,
    /// Leave the application.
    Quit,
}

/// Main application state.
#[derive(Debug, Clone)]
pub struct App {
    game: GameState,
    order: MoveOrder,
    show_locations: bool,
    cursor: Position,
    focus: Focus,
    /// Row selected in the move list, in display order.
    selected: usize,
    message: String,
}

impl App {
    /// Creates a new application from settings.
    #[instrument(skip(settings))]
    pub fn new(settings: &Settings) -> Self {
        Self {
            game: GameState::new(),
            order: *settings.move_order(),
            show_locations: *settings.show_locations(),
            cursor: Position::Center,
            focus: Focus::default(),
            selected: 0,
            message: "Player X's turn.".to_string(),
        }
    }

    /// The game being played.
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Current move-list order.
    pub fn order(&self) -> MoveOrder {
        self.order
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Focused pane.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Selected row of the move list.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Last feedback message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Move list entries in display order.
    pub fn steps(&self) -> Vec<Step> {
        self.game.steps(self.order)
    }

    /// Text shown for a move-list entry.
    pub fn step_text(&self, step: &Step) -> String {
        if self.show_locations {
            self.game
                .step_detail(*step.index())
                .unwrap_or_else(|| step.label().clone())
        } else {
            step.label().clone()
        }
    }

    /// Handles one key press.
    #[instrument(skip(self), fields(code = ?key.code))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Transition {
        if key.kind != KeyEventKind::Press {
            return Transition::Stay;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("User quit");
                return Transition::Quit;
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('o') => self.toggle_order(),
            KeyCode::Tab => {
                self.focus = self.focus.toggle();
                self.sync_selection();
            }
            KeyCode::Char('[') => self.step_by(-1),
            KeyCode::Char(']') => self.step_by(1),
            KeyCode::Char(c @ '1'..='9') => {
                if let Some(digit) = c.to_digit(10) {
                    self.place(digit as usize - 1);
                }
            }
            code => match self.focus {
                Focus::Board => self.handle_board_key(code),
                Focus::History => self.handle_history_key(code),
            },
        }
        Transition::Stay
    }

    fn handle_board_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.cursor = self.cursor.step(-1, 0),
            KeyCode::Down => self.cursor = self.cursor.step(1, 0),
            KeyCode::Left => self.cursor = self.cursor.step(0, -1),
            KeyCode::Right => self.cursor = self.cursor.step(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor.to_index()),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(self.game.len() - 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(index) = self.order.arrange(self.game.len()).get(self.selected) {
                    self.jump(*index);
                }
            }
            _ => {}
        }
    }

    /// Places a mark for the player to move at `cell`.
    #[instrument(skip(self))]
    pub fn place(&mut self, cell: usize) {
        match self.game.apply_move(cell) {
            MoveOutcome::Applied(mv) => {
                debug!(%mv, "Move applied to UI state");
                self.cursor = mv.position;
                self.message = format!("{} played {}", mv.player, mv.position.label());
            }
            MoveOutcome::Ignored(reason) => {
                self.message = reason.to_string();
            }
        }
        self.sync_selection();
    }

    /// Views the snapshot at `index`.
    #[instrument(skip(self))]
    pub fn jump(&mut self, index: usize) {
        if self.game.jump_to(index) {
            let label = self.game.step_label(index).unwrap_or_default();
            self.message = format!("Viewing {}", label);
        }
        self.sync_selection();
    }

    fn step_by(&mut self, delta: isize) {
        let target = self.game.current_index() as isize + delta;
        if target >= 0 {
            self.jump(target as usize);
        }
    }

    fn toggle_order(&mut self) {
        self.order = self.order.toggle();
        info!(order = self.order.label(), "Toggled move order");
        self.sync_selection();
    }

    /// Restarts the game.
    pub fn restart(&mut self) {
        debug!("Restarting game");
        self.game.restart();
        self.cursor = Position::Center;
        self.message = "Game restarted. Player X's turn.".to_string();
        self.sync_selection();
    }

    /// Points the move-list selection at the viewed snapshot.
    fn sync_selection(&mut self) {
        let current = self.game.current_index();
        self.selected = self
            .order
            .arrange(self.game.len())
            .iter()
            .position(|index| *index == current)
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(app: &mut App, code: KeyCode) -> Transition {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn app() -> App {
        App::new(&Settings::default())
    }

    #[test]
    fn test_digit_keys_place_marks() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('5'));
        let board = app.game().current_board();
        assert_eq!(board.occupied(), 2);
        assert!(!board.is_empty(Position::TopLeft));
        assert!(!board.is_empty(Position::Center));
        assert_eq!(app.message(), "O played Center");
    }

    #[test]
    fn test_cursor_and_enter_place_mark() {
        let mut app = app();
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor(), Position::TopLeft);
        press(&mut app, KeyCode::Enter);
        assert!(!app.game().current_board().is_empty(Position::TopLeft));
    }

    #[test]
    fn test_occupied_square_reports_reason() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.game().len(), 2);
        assert_eq!(app.message(), "Center is already occupied");
    }

    #[test]
    fn test_brackets_step_through_history() {
        let mut app = app();
        for key in ['1', '2', '3'] {
            press(&mut app, KeyCode::Char(key));
        }
        press(&mut app, KeyCode::Char('['));
        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.game().current_index(), 1);
        assert_eq!(app.message(), "Viewing Move #1");
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.game().current_index(), 2);
        assert_eq!(app.game().len(), 4);
    }

    #[test]
    fn test_history_focus_jumps_to_selection() {
        let mut app = app();
        for key in ['1', '2', '3'] {
            press(&mut app, KeyCode::Char(key));
        }
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::History);
        assert_eq!(app.selected(), 3);

        for _ in 0..3 {
            press(&mut app, KeyCode::Up);
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.game().current_index(), 0);

        // Branch overwrite from the opening board.
        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.game().len(), 2);
    }

    #[test]
    fn test_descending_order_selection_tracks_current() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.order(), MoveOrder::Descending);
        // Newest entry is listed first.
        assert_eq!(app.selected(), 0);
        assert_eq!(app.steps()[0].label(), "Move #2");
    }

    #[test]
    fn test_step_text_with_and_without_locations() {
        let mut app = app();
        press(&mut app, KeyCode::Char('4'));
        let step = app.steps()[1].clone();
        assert_eq!(app.step_text(&step), "Move #1: X at (row 2, col 1)");

        app.show_locations = false;
        assert_eq!(app.step_text(&step), "Move #1");
    }

    #[test]
    fn test_restart_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.game().len(), 1);
        assert_eq!(press(&mut app, KeyCode::Char('q')), Transition::Quit);
    }
}
