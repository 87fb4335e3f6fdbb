//! HTTP error responses.

use crate::wire::WireError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use derive_more::{Display, Error, From};
use tictactoe_engine::SearchError;
use tracing::{error, warn};

/// Error returned by a request handler.
#[derive(Debug, Display, Error, From)]
pub enum ServiceError {
    /// The request board could not be decoded.
    #[display("Invalid board: {}", _0)]
    Board(WireError),

    /// The board has no move for the engine to make.
    #[display("{}", _0)]
    Search(SearchError),

    /// The blocking search task panicked or was cancelled.
    #[display("Search task failed: {}", _0)]
    Task(tokio::task::JoinError),
}

impl ServiceError {
    /// Status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Board(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Search(_) => StatusCode::CONFLICT,
            ServiceError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            warn!(error = %self, %status, "Request rejected");
        }
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
