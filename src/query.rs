//! One-shot board queries for the `best` and `analyze` commands.

use derive_more::{Display, Error, From};
use std::cmp::Ordering;
use tictactoe_engine::{
    Board, DRAW, Mark, ParseBoardError, Score, SearchError, best_move, score_moves,
};
use tracing::instrument;

/// Error answering a board query.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum QueryError {
    /// The board string is not valid compact notation.
    #[display("Invalid board: {}", _0)]
    Board(ParseBoardError),

    /// The engine has no move on this board.
    #[display("{}", _0)]
    Search(SearchError),
}

/// The mark to move on a board reached by alternating play with X first.
pub fn side_to_move(board: &Board) -> Mark {
    if board.count(Mark::X) > board.count(Mark::O) {
        Mark::O
    } else {
        Mark::X
    }
}

/// Outcome named by the sign of a score: above a draw wins, below loses.
fn score_label(score: Score) -> &'static str {
    match score.cmp(&DRAW) {
        Ordering::Greater => "win",
        Ordering::Equal => "draw",
        Ordering::Less => "loss",
    }
}

fn resolve(board: &str, engine: Option<Mark>) -> Result<(Board, Mark), QueryError> {
    let board: Board = board.parse()?;
    let engine = engine.unwrap_or_else(|| side_to_move(&board));
    Ok((board, engine))
}

/// Describes the engine's best move on `board`.
#[instrument(skip(board))]
pub fn best(board: &str, engine: Option<Mark>) -> Result<String, QueryError> {
    let (board, engine) = resolve(board, engine)?;
    let result = best_move(&board, engine, engine.opponent())?;

    Ok(format!(
        "{} plays {} ({}): {} [{} positions searched]",
        engine,
        result.position.to_index(),
        result.position.label(),
        score_label(result.score),
        result.nodes
    ))
}

/// Lists the score of every legal move on `board`, in cell index order.
#[instrument(skip(board))]
pub fn analyze(board: &str, engine: Option<Mark>) -> Result<String, QueryError> {
    let (board, engine) = resolve(board, engine)?;
    let moves = score_moves(&board, engine, engine.opponent())?;

    let mut out = format!("{}\n\n{} to move:\n", board.display(), engine);
    for scored in moves {
        out.push_str(&format!(
            "  {} {:<14} {:>2}  {}\n",
            scored.position.to_index(),
            scored.position.label(),
            scored.score,
            score_label(scored.score)
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_to_move_from_counts() {
        assert_eq!(side_to_move(&Board::new()), Mark::X);
        assert_eq!(side_to_move(&"X........".parse().unwrap()), Mark::O);
        assert_eq!(side_to_move(&"XO.......".parse().unwrap()), Mark::X);
    }

    #[test]
    fn test_score_labels() {
        use tictactoe_engine::{LOSS, WIN};

        assert_eq!(score_label(WIN), "win");
        assert_eq!(score_label(DRAW), "draw");
        assert_eq!(score_label(LOSS), "loss");
    }

    #[test]
    fn test_analyze_lists_moves_in_index_order() {
        let out = analyze("XX.OO....", Some(Mark::X)).unwrap();
        let listed: Vec<&str> = out
            .lines()
            .filter_map(|line| line.strip_prefix("  "))
            .filter_map(|line| line.split_whitespace().next())
            .collect();
        assert_eq!(listed, vec!["2", "5", "6", "7", "8"]);
        assert!(out.contains("  2 Top-right       1  win"), "{out}");
    }

    #[test]
    fn test_best_reports_winning_cell() {
        let line = best("XX.OO....", Some(Mark::O)).unwrap();
        assert!(line.starts_with("O plays 2 (Top-right): win"), "{line}");
    }

    #[test]
    fn test_best_infers_engine_mark() {
        // X has moved twice, O twice: X to move and 2 completes the top row.
        let line = best("XX.OO....", None).unwrap();
        assert!(line.starts_with("X plays 2"), "{line}");
    }

    #[test]
    fn test_analyze_lists_every_empty_cell() {
        let out = analyze("XOXXOOOX.", Some(Mark::X)).unwrap();
        assert!(out.contains("X to move"));
        assert!(out.contains("  8 Bottom-right"), "{out}");
        assert!(out.contains("draw"), "{out}");
    }

    #[test]
    fn test_query_errors() {
        assert!(matches!(best("XX", None), Err(QueryError::Board(_))));
        assert_eq!(
            best("XOXXOOOXX", None),
            Err(QueryError::Search(SearchError::NoLegalMoves))
        );
    }
}
