//! A single human-versus-engine game.
//!
//! The human's move is checked for a win or draw before the engine is asked
//! for a reply, so the engine never moves on a finished board.

use crate::rules::{self, Outcome};
use crate::search::{self, SearchError, SearchResult};
use crate::{Board, Mark, Position, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Who places the first mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstMover {
    /// The human opens.
    #[default]
    Human,
    /// The engine opens.
    Engine,
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl From<Outcome> for GameStatus {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(mark) => GameStatus::Won(mark),
            Outcome::Draw => GameStatus::Draw,
            Outcome::Ongoing => GameStatus::InProgress,
        }
    }
}

/// A mark placed on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Result of one exchange: the human's move and the engine's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turn {
    /// Where the human played.
    pub human: Position,
    /// The engine's reply, absent when the human's move ended the game.
    pub reply: Option<SearchResult>,
    /// Status after the exchange.
    pub status: GameStatus,
}

/// Error that can occur when playing a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(#[error(not(source))] Position),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The engine opens and has not been asked to yet.
    #[display("The engine moves first; call start() before playing")]
    NotStarted,

    /// The opening move has already been made.
    #[display("Game has already started")]
    AlreadyStarted,

    /// The search engine rejected the position.
    #[display("Engine error: {}", _0)]
    Search(SearchError),
}

impl From<SearchError> for MoveError {
    fn from(err: SearchError) -> Self {
        MoveError::Search(err)
    }
}

/// Tic-tac-toe game between a human and the search engine.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    human: Mark,
    first: FirstMover,
    status: GameStatus,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game. The engine plays the mark opposite `human`.
    #[instrument]
    pub fn new(human: Mark, first: FirstMover) -> Self {
        Self {
            board: Board::new(),
            human,
            first,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns a reference to the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The human's mark.
    pub fn human(&self) -> Mark {
        self.human
    }

    /// The engine's mark.
    pub fn engine(&self) -> Mark {
        self.human.opponent()
    }

    /// Who opens.
    pub fn first(&self) -> FirstMover {
        self.first
    }

    /// The mark due to move next, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Mark> {
        if self.status != GameStatus::InProgress {
            return None;
        }
        let opener = match self.first {
            FirstMover::Human => self.human,
            FirstMover::Engine => self.engine(),
        };
        Some(if self.history.len() % 2 == 0 {
            opener
        } else {
            opener.opponent()
        })
    }

    /// Makes the engine's opening move when the engine plays first.
    ///
    /// Returns `None` for a game the human opens.
    ///
    /// # Errors
    ///
    /// [`MoveError::AlreadyStarted`] once any move has been played.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> Result<Option<SearchResult>, MoveError> {
        if !self.history.is_empty() {
            return Err(MoveError::AlreadyStarted);
        }
        match self.first {
            FirstMover::Human => Ok(None),
            FirstMover::Engine => self.engine_reply().map(Some),
        }
    }

    /// Plays the human's mark at `pos`, then the engine's reply if the game
    /// is still in progress.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] after a win or draw,
    /// [`MoveError::NotStarted`] if the engine has not opened yet, and
    /// [`MoveError::SquareOccupied`] if `pos` is taken.
    #[instrument(skip(self), fields(position = pos.to_index(), human = %self.human))]
    pub fn play(&mut self, pos: Position) -> Result<Turn, MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }
        if self.to_move() != Some(self.human) {
            return Err(MoveError::NotStarted);
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        self.place(self.human, pos);
        if self.status != GameStatus::InProgress {
            info!(status = ?self.status, "Game ended on the human's move");
            return Ok(Turn {
                human: pos,
                reply: None,
                status: self.status,
            });
        }

        let reply = self.engine_reply()?;
        Ok(Turn {
            human: pos,
            reply: Some(reply),
            status: self.status,
        })
    }

    /// Clears the board for a new game with the same marks and opener.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.status = GameStatus::InProgress;
        self.history.clear();
        info!("Game reset");
    }

    fn engine_reply(&mut self) -> Result<SearchResult, MoveError> {
        let engine = self.engine();
        let result = search::best_move(&self.board, engine, self.human)?;
        self.place(engine, result.position);
        debug!(
            position = result.position.to_index(),
            score = result.score,
            "Engine replied"
        );
        Ok(result)
    }

    fn place(&mut self, mark: Mark, position: Position) {
        self.board.set(position, Square::Occupied(mark));
        self.history.push(Move { mark, position });
        self.status = rules::evaluate(&self.board).into();
    }
}
