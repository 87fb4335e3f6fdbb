//! JSON board encoding used by the browser client.
//!
//! The client sends the board as three rows of three strings: `"X"`, `"O"`
//! or `""` for an empty cell. Malformed boards are rejected here, before
//! the engine sees them.

use derive_more::{Display, Error};
use tictactoe_engine::{Board, Mark, Square};
use tracing::instrument;

/// Board as exchanged over HTTP: rows of cell strings.
pub type GridBoard = Vec<Vec<String>>;

/// Error decoding a [`GridBoard`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum WireError {
    /// The board does not have three rows.
    #[display("Expected 3 rows, found {}", _0)]
    RowCount(#[error(not(source))] usize),

    /// A row does not have three cells.
    #[display("Row {} has {} cells, expected 3", row, len)]
    RowLength {
        /// Row index.
        row: usize,
        /// Number of cells found.
        len: usize,
    },

    /// A cell holds something other than a mark or an empty string.
    #[display("Invalid cell {:?} at row {}, column {}", value, row, col)]
    InvalidCell {
        /// Row index.
        row: usize,
        /// Column index.
        col: usize,
        /// The offending string.
        value: String,
    },
}

/// Decodes a grid into a board.
///
/// Cells are trimmed and matched case-insensitively; `""` and `" "` both
/// mean empty.
#[instrument(skip(grid))]
pub fn decode(grid: &[Vec<String>]) -> Result<Board, WireError> {
    if grid.len() != 3 {
        return Err(WireError::RowCount(grid.len()));
    }

    let mut squares = [Square::Empty; 9];
    for (row, cells) in grid.iter().enumerate() {
        if cells.len() != 3 {
            return Err(WireError::RowLength {
                row,
                len: cells.len(),
            });
        }
        for (col, value) in cells.iter().enumerate() {
            squares[row * 3 + col] = decode_cell(value).ok_or_else(|| WireError::InvalidCell {
                row,
                col,
                value: value.clone(),
            })?;
        }
    }

    Ok(Board::from_squares(squares))
}

fn decode_cell(value: &str) -> Option<Square> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (None, _) => Some(Square::Empty),
        (Some(c), None) => Mark::from_char(c).map(Square::Occupied),
        _ => None,
    }
}

/// Encodes a board as a grid, empty cells as `""`.
pub fn encode(board: &Board) -> GridBoard {
    board
        .squares()
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|square| square.mark().map(|m| m.to_string()).unwrap_or_default())
                .collect()
        })
        .collect()
}
