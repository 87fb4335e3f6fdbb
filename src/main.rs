//! tictactoe_minimax - unified CLI
//!
//! Serve the engine over HTTP, play it in the terminal, or query a board.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tictactoe_engine::{FirstMover, Game};
use tictactoe_minimax::cli::{Cli, Command, MarkArg};
use tictactoe_minimax::{ServerConfig, query, server, terminal};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,tictactoe_minimax=debug,tictactoe_engine=info";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Interactive and one-shot modes keep stdout clean for the board.
    let default_filter = match cli.command {
        Command::Serve { .. } => DEFAULT_FILTER,
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve { host, port, config } => run_server(host, port, config),
        Command::Play { human, engine_first } => run_play(human, engine_first),
        Command::Best { board, engine } => {
            println!("{}", query::best(&board, engine.map(Into::into))?);
            Ok(())
        }
        Command::Analyze { board, engine } => {
            print!("{}", query::analyze(&board, engine.map(Into::into))?);
            Ok(())
        }
    }
}

/// Run the HTTP service
#[instrument]
fn run_server(host: Option<String>, port: Option<u16>, config: PathBuf) -> Result<()> {
    let config = ServerConfig::load_or_default(&config)?
        .with_host(host)
        .with_port(port);
    info!(?config, "Starting tictactoe_minimax server");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::run(&config))?;
    Ok(())
}

/// Run the terminal game
#[instrument]
fn run_play(human: MarkArg, engine_first: bool) -> Result<()> {
    let first = if engine_first {
        FirstMover::Engine
    } else {
        FirstMover::Human
    };
    let mut game = Game::new(human.into(), first);

    let stdin = std::io::stdin();
    terminal::play(&mut game, stdin.lock(), std::io::stdout())?;
    Ok(())
}
