//! Command-line interface for tictactoe_minimax.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tictactoe_engine::Mark;

/// Tic-tac-toe against a perfect-play minimax engine
#[derive(Parser, Debug)]
#[command(name = "tictactoe_minimax")]
#[command(about = "Tic-tac-toe against a minimax engine that never loses", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service for the browser client
    Serve {
        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to the server config file (defaults apply if it is missing)
        #[arg(short, long, default_value = "tictactoe.toml")]
        config: PathBuf,
    },

    /// Play against the engine in the terminal
    Play {
        /// Mark you play
        #[arg(long, value_enum, default_value = "x")]
        human: MarkArg,

        /// Let the engine make the first move
        #[arg(long)]
        engine_first: bool,
    },

    /// Print the engine's best move for a board such as "XX.OO...."
    Best {
        /// Board in compact notation, row by row
        board: String,

        /// Mark the engine plays (inferred from the mark counts if omitted)
        #[arg(long, value_enum)]
        engine: Option<MarkArg>,
    },

    /// Print the score of every legal move for a board
    Analyze {
        /// Board in compact notation, row by row
        board: String,

        /// Mark the engine plays (inferred from the mark counts if omitted)
        #[arg(long, value_enum)]
        engine: Option<MarkArg>,
    },
}

/// A mark as written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MarkArg {
    /// X
    X,
    /// O
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}
