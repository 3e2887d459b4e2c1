//! Pure tic-tac-toe game logic with snapshot history and time travel.
//!
//! A [`GameState`] keeps every board the game has passed through. Moves
//! append a new [`Snapshot`]; [`GameState::jump_to`] views an older one, and
//! the next move made from there overwrites the abandoned future.
//!
//! # Example
//!
//! ```
//! use rewind_tictactoe::{GameState, Player};
//!
//! let mut game = GameState::new();
//! for cell in [0, 1, 3, 4, 6] {
//!     game.apply_move(cell);
//! }
//! let win = game.winner().expect("X holds the left column");
//! assert_eq!(*win.winner(), Player::X);
//! assert_eq!(win.indices(), [0, 3, 6]);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod game;
pub mod invariants;
mod order;
mod position;
pub mod rules;
mod snapshot;
mod status;
mod types;

pub use action::{IgnoreReason, Move, MoveOutcome};
pub use game::{GameState, HistoryError, Step};
pub use order::MoveOrder;
pub use position::Position;
pub use rules::{WinResult, evaluate};
pub use snapshot::Snapshot;
pub use status::GameStatus;
pub use types::{Board, Player, Square};
