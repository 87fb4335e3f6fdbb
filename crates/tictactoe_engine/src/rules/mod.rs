//! Game rules for tic-tac-toe.
//!
//! Pure functions that classify a board. Nothing here mutates state, so the
//! search engine can call them at every node.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WINNING_LINES, check_winner, winning_line};

use crate::{Board, Mark};
use serde::{Deserialize, Serialize};

/// Classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// A mark holds a full winning line.
    Winner(Mark),
    /// No winner and no empty square.
    Draw,
    /// No winner and at least one empty square.
    Ongoing,
}

impl Outcome {
    /// Winner and Draw are terminal.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// The winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(mark),
            _ => None,
        }
    }
}

/// Determines whether the board is won, drawn, or still in play.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(mark) = check_winner(board) {
        Outcome::Winner(mark)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}
