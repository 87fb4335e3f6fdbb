//! Optimal move selection by minimax with alpha-beta pruning.
//!
//! The tic-tac-toe tree is small enough to search to the end from any
//! position, so every score is exact: [`WIN`], [`DRAW`] or [`LOSS`] from
//! the engine's point of view. There is no depth limit, no heuristic, and
//! no depth discounting.

use crate::rules::{self, Outcome};
use crate::{Board, Mark, Position, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Game-theoretic value of a position for the engine.
pub type Score = i32;

/// The engine wins with best play.
pub const WIN: Score = 1;
/// Best play from both sides draws.
pub const DRAW: Score = 0;
/// The human wins with best play.
pub const LOSS: Score = -1;

/// The move chosen by [`best_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Cell to play.
    pub position: Position,
    /// Value of the position after playing it.
    pub score: Score,
    /// Positions visited during the search.
    pub nodes: u64,
}

/// A legal move and its value, as reported by [`score_moves`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    /// Cell played.
    pub position: Position,
    /// Value of the position after playing it.
    pub score: Score,
}

/// Caller contract violations. A well-formed request never produces one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SearchError {
    /// A move was requested on a full board.
    #[display("No legal moves: the board is full")]
    NoLegalMoves,

    /// Engine and human were given the same mark.
    #[display("Engine and human cannot both play {}", _0)]
    SameMarks(#[error(not(source))] Mark),
}

/// Scratch state for one top-level call. Dropped when the call returns.
struct Search {
    board: Board,
    engine: Mark,
    human: Mark,
    nodes: u64,
}

impl Search {
    fn new(board: &Board, engine: Mark, human: Mark) -> Result<Self, SearchError> {
        if engine == human {
            return Err(SearchError::SameMarks(engine));
        }
        if board.is_full() {
            return Err(SearchError::NoLegalMoves);
        }

        Ok(Self {
            board: *board,
            engine,
            human,
            nodes: 0,
        })
    }

    /// Scores every empty cell for the engine, in ascending index order.
    ///
    /// Each root child is searched with a fresh (-inf, +inf) window so its
    /// score is exact rather than a bound.
    fn for_each_root_move(&mut self, mut visit: impl FnMut(Position, Score)) {
        for pos in Position::ALL {
            if !self.board.is_empty(pos) {
                continue;
            }

            self.board.set(pos, Square::Occupied(self.engine));
            let score = self.minimax(Score::MIN, Score::MAX, false);
            self.board.set(pos, Square::Empty);

            visit(pos, score);
        }
    }

    fn minimax(&mut self, mut alpha: Score, mut beta: Score, maximizing: bool) -> Score {
        self.nodes += 1;

        match rules::evaluate(&self.board) {
            Outcome::Winner(mark) if mark == self.engine => return WIN,
            Outcome::Winner(_) => return LOSS,
            Outcome::Draw => return DRAW,
            Outcome::Ongoing => {}
        }

        let mover = if maximizing { self.engine } else { self.human };
        let mut best = if maximizing { Score::MIN } else { Score::MAX };

        for pos in Position::ALL {
            if !self.board.is_empty(pos) {
                continue;
            }

            self.board.set(pos, Square::Occupied(mover));
            let score = self.minimax(alpha, beta, !maximizing);
            self.board.set(pos, Square::Empty);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Finds the optimal move for `engine_mark`, with `human_mark` to reply.
///
/// Ties go to the lowest cell index. The caller's board is not modified.
///
/// # Errors
///
/// [`SearchError::NoLegalMoves`] if the board is full,
/// [`SearchError::SameMarks`] if both sides were given the same mark.
#[instrument(skip(board), fields(board = %board))]
pub fn best_move(
    board: &Board,
    engine_mark: Mark,
    human_mark: Mark,
) -> Result<SearchResult, SearchError> {
    let mut search = Search::new(board, engine_mark, human_mark)?;

    let mut best: Option<(Position, Score)> = None;
    search.for_each_root_move(|pos, score| {
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    });

    let (position, score) = best.ok_or(SearchError::NoLegalMoves)?;
    let result = SearchResult {
        position,
        score,
        nodes: search.nodes,
    };

    debug!(
        position = position.to_index(),
        score,
        nodes = search.nodes,
        "Search complete"
    );
    Ok(result)
}

/// Scores every legal move for `engine_mark`, in ascending index order.
///
/// The move [`best_move`] picks is the first entry with the maximum score.
///
/// # Errors
///
/// Same as [`best_move`].
#[instrument(skip(board), fields(board = %board))]
pub fn score_moves(
    board: &Board,
    engine_mark: Mark,
    human_mark: Mark,
) -> Result<Vec<ScoredMove>, SearchError> {
    let mut search = Search::new(board, engine_mark, human_mark)?;

    let mut moves = Vec::with_capacity(9);
    search.for_each_root_move(|position, score| moves.push(ScoredMove { position, score }));

    debug!(moves = moves.len(), nodes = search.nodes, "Scored all moves");
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        // O holds 0 and 4; 8 completes the diagonal and nothing else wins.
        let b = board("OX.XO.X..");
        let result = best_move(&b, Mark::O, Mark::X).unwrap();
        assert_eq!(result.position, Position::BottomRight);
        assert_eq!(result.score, WIN);
    }

    #[test]
    fn test_blocks_threat() {
        // X threatens column 0, O must block at 6.
        let b = board("X..XO....");
        let result = best_move(&b, Mark::O, Mark::X).unwrap();
        assert_eq!(result.position, Position::BottomLeft);
    }

    #[test]
    fn test_full_board_is_an_error() {
        let b = board("XOXXOOOXX");
        assert_eq!(best_move(&b, Mark::O, Mark::X), Err(SearchError::NoLegalMoves));
        assert_eq!(score_moves(&b, Mark::O, Mark::X), Err(SearchError::NoLegalMoves));
    }

    #[test]
    fn test_same_marks_is_an_error() {
        let b = Board::new();
        assert_eq!(best_move(&b, Mark::X, Mark::X), Err(SearchError::SameMarks(Mark::X)));
    }

    #[test]
    fn test_caller_board_unchanged() {
        let b = board("X...O....");
        let before = b;
        best_move(&b, Mark::X, Mark::O).unwrap();
        assert_eq!(b, before);
    }

    #[test]
    fn test_single_empty_cell() {
        let b = board("XOXXOOOX.");
        let result = best_move(&b, Mark::X, Mark::O).unwrap();
        assert_eq!(result.position, Position::BottomRight);
        assert_eq!(result.score, DRAW);
        assert_eq!(result.nodes, 1);
    }

    #[test]
    fn test_score_moves_matches_best_move() {
        let b = board("X...O...X");
        let moves = score_moves(&b, Mark::O, Mark::X).unwrap();
        let best = best_move(&b, Mark::O, Mark::X).unwrap();

        assert_eq!(moves.len(), 6);
        let max = moves.iter().map(|m| m.score).max().unwrap();
        let first_max = moves.iter().find(|m| m.score == max).unwrap();
        assert_eq!(first_max.position, best.position);
        assert_eq!(first_max.score, best.score);
    }
}
