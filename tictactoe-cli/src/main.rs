//! TicTacToe CLI - Command-line interface
//!
//! Commands:
//! - play: Play interactively against a human or the engine
//! - match: Pit two engines against each other

mod args;
mod match_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe with a random or unbeatable computer opponent")]
struct Cli {
    /// Random seed for reproducible engine play
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play_cmd::PlayArgs),
    /// Play engine against engine
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}
