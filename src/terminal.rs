//! Interactive terminal game against the engine.
//!
//! Reads one command per line: a cell number 1-9 (or a cell label such as
//! `center`), `r` to start over, `q` to quit.

use std::io::{self, BufRead, Write};
use tictactoe_engine::{FirstMover, Game, GameStatus, MoveError, Position, SearchResult};
use tracing::{debug, instrument, warn};

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play at a cell.
    Play(Position),
    /// Start a new game.
    Reset,
    /// Leave.
    Quit,
}

impl Command {
    /// Parses a line of input. Returns `None` for anything unrecognized.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "q" | "quit" => Some(Command::Quit),
            "r" | "reset" => Some(Command::Reset),
            other => Position::parse_input(other).map(Command::Play),
        }
    }
}

/// Message shown when a game ends.
pub fn result_message(status: GameStatus) -> Option<String> {
    match status {
        GameStatus::InProgress => None,
        GameStatus::Won(mark) => Some(format!("{} wins!", mark)),
        GameStatus::Draw => Some("It's a draw!".to_string()),
    }
}

/// Runs the game loop until `q` or end of input.
#[instrument(skip_all, fields(human = %game.human()))]
pub fn play<R: BufRead, W: Write>(game: &mut Game, input: R, mut output: W) -> io::Result<()> {
    let opener = match game.first() {
        FirstMover::Human => "you move first",
        FirstMover::Engine => "the engine moves first",
    };
    writeln!(
        output,
        "You are {}, the engine is {}, {}. Enter 1-9 to move, r to reset, q to quit.",
        game.human(),
        game.engine(),
        opener
    )?;
    open(game, &mut output)?;

    for line in input.lines() {
        let line = line?;
        let Some(command) = Command::parse(&line) else {
            writeln!(output, "Unrecognized input: {:?}", line.trim())?;
            continue;
        };
        debug!(?command, "Player command");

        match command {
            Command::Quit => break,
            Command::Reset => {
                game.reset();
                open(game, &mut output)?;
            }
            Command::Play(pos) => match game.play(pos) {
                Ok(turn) => {
                    if let Some(reply) = turn.reply {
                        announce(game, reply, &mut output)?;
                    }
                    writeln!(output, "{}", game.board().display())?;
                    if let Some(message) = result_message(turn.status) {
                        writeln!(output, "{}", message)?;
                        writeln!(output, "Press r to play again or q to quit.")?;
                    }
                }
                Err(MoveError::GameOver) => {
                    writeln!(output, "The game is over. Press r to play again.")?;
                }
                Err(MoveError::SquareOccupied(taken)) => {
                    writeln!(
                        output,
                        "{} is taken. Free cells: {}",
                        taken.label(),
                        free_cells(game)
                    )?;
                }
                Err(e) => {
                    warn!(error = %e, "Move rejected");
                    writeln!(output, "{}", e)?;
                }
            },
        }
    }

    Ok(())
}

/// Makes the engine's opening move if it has one and shows the board.
fn open<W: Write>(game: &mut Game, output: &mut W) -> io::Result<()> {
    match game.start() {
        Ok(Some(reply)) => announce(game, reply, output)?,
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Could not start game"),
    }
    writeln!(output, "{}", game.board().display())
}

/// Free cells as the 1-based numbers the player types.
fn free_cells(game: &Game) -> String {
    Position::valid_moves(game.board())
        .iter()
        .map(|pos| (pos.to_index() + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn announce<W: Write>(game: &Game, reply: SearchResult, output: &mut W) -> io::Result<()> {
    writeln!(
        output,
        "Engine ({}) plays {} ({}).",
        game.engine(),
        reply.position.to_index() + 1,
        reply.position.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_engine::Mark;

    fn run(game: &mut Game, script: &str) -> String {
        let mut out = Vec::new();
        play(game, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("q"), Some(Command::Quit));
        assert_eq!(Command::parse(" R "), Some(Command::Reset));
        assert_eq!(Command::parse("5"), Some(Command::Play(Position::Center)));
        assert_eq!(Command::parse("0"), None);
        assert_eq!(Command::parse("hello"), None);
    }

    #[test]
    fn test_result_messages() {
        assert_eq!(result_message(GameStatus::Won(Mark::X)).unwrap(), "X wins!");
        assert_eq!(result_message(GameStatus::Draw).unwrap(), "It's a draw!");
        assert_eq!(result_message(GameStatus::InProgress), None);
    }

    #[test]
    fn test_losing_line_announces_winner() {
        // Cells 1, 2, 4 in order lose to the engine's diagonal.
        let mut game = Game::new(Mark::X, FirstMover::Human);
        let out = run(&mut game, "1\n2\n4\n5\nq\n");
        assert!(out.contains("O wins!"), "{out}");
        assert!(out.contains("The game is over"), "{out}");
        assert_eq!(game.status(), GameStatus::Won(Mark::O));
    }

    #[test]
    fn test_occupied_and_garbage_input() {
        // The engine answers a center opening in the first corner.
        let mut game = Game::new(Mark::X, FirstMover::Human);
        let out = run(&mut game, "5\n5\nxyz\n");
        assert!(out.contains("Center is taken. Free cells: 2, 3, 4, 6, 7, 8, 9"), "{out}");
        assert!(out.contains("Unrecognized input"), "{out}");
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_intro_names_opener() {
        let out = run(&mut Game::new(Mark::X, FirstMover::Human), "q\n");
        assert!(out.contains("you move first"), "{out}");

        let out = run(&mut Game::new(Mark::X, FirstMover::Engine), "q\n");
        assert!(out.contains("the engine moves first"), "{out}");
    }

    #[test]
    fn test_reset_clears_board() {
        let mut game = Game::new(Mark::O, FirstMover::Engine);
        let out = run(&mut game, "r\n");
        // Engine opens once at the start and once after the reset.
        assert_eq!(out.matches("Engine (X) plays").count(), 2);
        assert_eq!(game.history().len(), 1);
    }
}
