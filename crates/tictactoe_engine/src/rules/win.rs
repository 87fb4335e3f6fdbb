//! Win detection logic for tic-tac-toe.

use crate::{Board, Mark, Position, Square};

/// The eight winning lines, checked in this order: rows, columns, diagonals.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns the mark of the first line (in [`WINNING_LINES`] order) held
/// entirely by one mark, `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|(mark, _)| mark)
}

/// Like [`check_winner`], but also returns the completed line.
pub fn winning_line(board: &Board) -> Option<(Mark, [Position; 3])> {
    for line @ [a, b, c] in WINNING_LINES {
        if let Square::Occupied(mark) = board.get(a)
            && board.get(b) == Square::Occupied(mark)
            && board.get(c) == Square::Occupied(mark)
        {
            return Some((mark, line));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_every_line_wins_alone() {
        for mark in [Mark::X, Mark::O] {
            for line in WINNING_LINES {
                let mut board = Board::new();
                for pos in line {
                    board.set(pos, Square::Occupied(mark));
                }
                assert_eq!(check_winner(&board), Some(mark), "line {:?}", line);
                assert_eq!(winning_line(&board), Some((mark, line)));
            }
        }
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Mark::X));
        board.set(Position::TopCenter, Square::Occupied(Mark::X));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board: Board = "XXO......".parse().unwrap();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_lines_checked_in_fixed_order() {
        // Not reachable in a real game, but the scan order must be stable.
        let board: Board = "XXXOOO...".parse().unwrap();
        assert_eq!(check_winner(&board), Some(Mark::X));
    }
}
