//! HTTP service mode.
//!
//! The browser client places the human's mark itself and posts the whole
//! board; the service answers with the engine's reply. No game state is
//! kept between requests.

use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::wire::{self, GridBoard};
use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_engine::{Board, Mark, Outcome, Score, SearchError, Square, best_move, evaluate};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, info, instrument};

/// Marks assigned to the engine and the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppState {
    engine: Mark,
    human: Mark,
}

impl AppState {
    /// State for an engine playing `engine`; the client plays the other mark.
    pub fn new(engine: Mark) -> Self {
        Self {
            engine,
            human: engine.opponent(),
        }
    }

    /// The engine's mark.
    pub fn engine(&self) -> Mark {
        self.engine
    }

    /// The client's mark.
    pub fn human(&self) -> Mark {
        self.human
    }
}

impl From<&ServerConfig> for AppState {
    fn from(config: &ServerConfig) -> Self {
        Self::new(*config.engine_mark())
    }
}

/// Request body for `/move` and `/best-move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardRequest {
    /// Board as rows of cell strings.
    pub board: GridBoard,
}

/// Game status as reported to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusLabel {
    /// Moves remain and nobody has won.
    Ongoing,
    /// A mark holds a full line.
    Won,
    /// Full board, no winner.
    Draw,
}

impl From<Outcome> for StatusLabel {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Winner(_) => StatusLabel::Won,
            Outcome::Draw => StatusLabel::Draw,
            Outcome::Ongoing => StatusLabel::Ongoing,
        }
    }
}

/// Response body for `/move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    /// Board after the engine's reply.
    pub board: GridBoard,
    /// Winning mark, if the game is won.
    pub winner: Option<Mark>,
    /// Status after the reply.
    pub status: StatusLabel,
    /// Cell index the engine played, `None` if the game was already over.
    pub engine_move: Option<usize>,
}

/// Response body for `/best-move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestMoveResponse {
    /// Cell index to play.
    pub position: usize,
    /// Value of the move for the engine.
    pub score: Score,
    /// Positions searched.
    pub nodes: u64,
}

/// Applies the engine's reply to a board the human has just moved on.
///
/// A board that is already won or drawn comes back unchanged.
pub fn reply_to(board: Board, state: AppState) -> Result<MoveResponse, SearchError> {
    let mut board = board;
    let mut engine_move = None;

    if evaluate(&board) == Outcome::Ongoing {
        let result = best_move(&board, state.engine, state.human)?;
        board.set(result.position, Square::Occupied(state.engine));
        engine_move = Some(result.position.to_index());
    } else {
        debug!("Game already over, engine does not move");
    }

    let outcome = evaluate(&board);
    Ok(MoveResponse {
        board: wire::encode(&board),
        winner: outcome.winner(),
        status: outcome.into(),
        engine_move,
    })
}

#[instrument(skip_all)]
async fn make_move(
    State(state): State<AppState>,
    Json(request): Json<BoardRequest>,
) -> Result<Json<MoveResponse>, ServiceError> {
    let board = wire::decode(&request.board)?;
    debug!(board = %board, "Move request");

    let response = tokio::task::spawn_blocking(move || reply_to(board, state)).await??;
    debug!(engine_move = ?response.engine_move, status = ?response.status, "Move response");
    Ok(Json(response))
}

#[instrument(skip_all)]
async fn suggest_move(
    State(state): State<AppState>,
    Json(request): Json<BoardRequest>,
) -> Result<Json<BestMoveResponse>, ServiceError> {
    let board = wire::decode(&request.board)?;
    debug!(board = %board, "Best-move request");

    let result =
        tokio::task::spawn_blocking(move || best_move(&board, state.engine, state.human))
            .await??;
    Ok(Json(BestMoveResponse {
        position: result.position.to_index(),
        score: result.score,
        nodes: result.nodes,
    }))
}

async fn health() -> &'static str {
    "ok"
}

/// Builds the service router, serving `static_dir` for any other path.
pub fn make_app(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        .route("/move", post(make_move))
        .route("/best-move", post(suggest_move))
        .route("/health", get(health))
        .with_state(state);

    let router = match static_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Serving static files");
            router.fallback_service(ServeDir::new(dir))
        }
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// Binds to the configured address and serves until the process exits.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn run(config: &ServerConfig) -> std::io::Result<()> {
    let state = AppState::from(config);
    let app = make_app(state, config.static_dir().as_deref());

    let listener =
        tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        addr = %listener.local_addr()?,
        engine = %state.engine,
        human = %state.human,
        "Server ready"
    );

    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_reply_completes_engine_line() {
        // Engine X has 0 and 1; 2 wins.
        let state = AppState::new(Mark::X);
        let response = reply_to(board("XX.OO...."), state).unwrap();
        assert_eq!(response.engine_move, Some(2));
        assert_eq!(response.winner, Some(Mark::X));
        assert_eq!(response.status, StatusLabel::Won);
    }

    #[test]
    fn test_reply_skips_engine_after_human_win() {
        let state = AppState::new(Mark::X);
        let won = board("OOOXX....");
        let response = reply_to(won, state).unwrap();
        assert_eq!(response.engine_move, None);
        assert_eq!(response.winner, Some(Mark::O));
        assert_eq!(response.board, wire::encode(&won));
    }

    #[test]
    fn test_reply_on_drawn_board() {
        let state = AppState::new(Mark::O);
        let response = reply_to(board("XOXXOOOXX"), state).unwrap();
        assert_eq!(response.engine_move, None);
        assert_eq!(response.status, StatusLabel::Draw);
        assert_eq!(response.winner, None);
    }

    #[test]
    fn test_status_label_serializes_lowercase() {
        let json = serde_json::to_string(&StatusLabel::Ongoing).unwrap();
        assert_eq!(json, "\"ongoing\"");
    }
}
