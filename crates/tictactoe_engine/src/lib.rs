//! Tic-tac-toe rules and a perfect-play engine.
//!
//! # Architecture
//!
//! - **Types**: [`Board`], [`Mark`], [`Square`], [`Position`]
//! - **Rules**: terminal-state detection ([`evaluate`], [`check_winner`])
//! - **Search**: minimax with alpha-beta pruning ([`best_move`])
//! - **Game**: one human-versus-engine game ([`Game`])
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{Board, Mark, Position, best_move};
//!
//! let board: Board = "XX.OO....".parse().unwrap();
//! let result = best_move(&board, Mark::O, Mark::X).unwrap();
//! assert!(board.is_empty(result.position));
//! # assert_eq!(result.position, Position::TopRight);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod game;
mod position;
pub mod rules;
pub mod search;
mod types;

pub use game::{FirstMover, Game, GameStatus, Move, MoveError, Turn};
pub use position::Position;
pub use rules::{Outcome, WINNING_LINES, check_winner, evaluate, is_draw, is_full, winning_line};
pub use search::{
    DRAW, LOSS, Score, ScoredMove, SearchError, SearchResult, WIN, best_move, score_moves,
};
pub use types::{Board, Mark, ParseBoardError, Square};
