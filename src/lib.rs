//! Tic-tac-toe against a perfect-play engine.
//!
//! The game logic and the minimax search live in [`tictactoe_engine`]. This
//! crate puts them in front of a player.
//!
//! # Architecture
//!
//! - **Server**: stateless HTTP service for the browser client
//! - **Terminal**: interactive game on stdin/stdout
//! - **Query**: one-shot best-move and analysis reports
//! - **Wire**: JSON board encoding shared with the client
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_minimax::{AppState, make_app};
//! use tictactoe_engine::Mark;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = make_app(AppState::new(Mark::X), None);
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod query;
pub mod server;
pub mod terminal;
pub mod wire;

pub use config::{ConfigError, ServerConfig};
pub use error::ServiceError;
pub use query::QueryError;
pub use server::{
    AppState, BestMoveResponse, BoardRequest, MoveResponse, StatusLabel, make_app, reply_to,
};
pub use wire::{GridBoard, WireError};
