//! Play command - interactive game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), game_loop()
//! - Level 3: parse_command(), apply_command()
//! - Level 4: board and status rendering

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tictactoe_core::{GameConfig, Line, Mode, Outcome, Strategy, TurnController};

use crate::args::{MarkArg, ModeArg, StrategyArg};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// JSON config file; command-line flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Game mode
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Engine difficulty
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Mark the engine plays
    #[arg(long, value_enum)]
    pub engine: Option<MarkArg>,
}

/// One line of player input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    Move { row: usize, col: usize },
    ToggleMode,
    Restart,
    SetStrategy(Strategy),
    Quit,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;

    tracing::info!(
        "Starting game: mode={:?}, strategy={:?}, engine={:?}",
        config.mode,
        config.strategy,
        config.engine_player
    );

    let mut game = TurnController::from_config(&config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    game_loop(&mut game, stdin.lock(), stdout.lock())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Merge config file, defaults and flags
fn build_config(args: &PlayArgs, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(mode) = args.mode {
        config = config.with_mode(mode.into());
    }
    if let Some(strategy) = args.strategy {
        config = config.with_strategy(strategy.into());
    }
    if let Some(engine) = args.engine {
        config = config.with_engine_player(engine.into());
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    Ok(config)
}

/// Read commands until quit or end of input
fn game_loop<R: BufRead, W: Write>(game: &mut TurnController, input: R, mut out: W) -> Result<()> {
    writeln!(out, "{}", HELP)?;
    render(game, &mut out)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let Some(command) = parse_command(&line) else {
            writeln!(out, "Unrecognized input: {:?}", line.trim())?;
            continue;
        };

        if command == Command::Quit {
            writeln!(out, "The game has been exited.")?;
            break;
        }

        apply_command(game, command, &mut out)?;
        render(game, &mut out)?;
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["q"] | ["quit"] => Some(Command::Quit),
        ["g"] => Some(Command::ToggleMode),
        ["r"] => Some(Command::Restart),
        ["0"] => Some(Command::SetStrategy(Strategy::RandomChoice)),
        ["1"] => Some(Command::SetStrategy(Strategy::ExhaustiveSearch)),
        [row, col] => Some(Command::Move {
            row: row.parse().ok()?,
            col: col.parse().ok()?,
        }),
        _ => None,
    }
}

fn apply_command<W: Write>(game: &mut TurnController, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Move { row, col } => match game.submit_human_move(row, col) {
            Ok(()) => {
                if let Some(mv) = game.last_engine_move() {
                    writeln!(out, "Engine claimed {}", mv)?;
                }
            }
            Err(err) => writeln!(out, "Invalid move: {}", err)?,
        },
        Command::ToggleMode => {
            game.toggle_mode();
            let label = match game.mode() {
                Mode::HumanVsHuman => "player vs player",
                Mode::HumanVsEngine => "player vs engine",
            };
            writeln!(out, "It is now {} mode.", label)?;
            if let Some(mv) = game.last_engine_move() {
                writeln!(out, "Engine claimed {}", mv)?;
            }
        }
        Command::Restart => {
            game.restart();
            writeln!(out, "New game has started.")?;
        }
        Command::SetStrategy(strategy) => {
            game.set_strategy(strategy);
            let label = match strategy {
                Strategy::RandomChoice => "random",
                Strategy::ExhaustiveSearch => "unbeatable",
            };
            writeln!(out, "The engine is now {}.", label)?;
        }
        Command::Quit => {}
    }
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

const HELP: &str = "Enter \"row col\" (0-2) to claim a cell. \
g: toggle mode, r: restart, 0: random engine, 1: unbeatable engine, q: quit.";

fn render<W: Write>(game: &TurnController, out: &mut W) -> Result<()> {
    writeln!(out)?;
    write!(out, "{}", game.state())?;

    match game.current_outcome() {
        Outcome::None => writeln!(out, "{} to move.", game.active_player().symbol())?,
        Outcome::Draw => writeln!(out, "Draw.")?,
        outcome => {
            if let (Some(mark), Some((line, _))) = (outcome.winner(), game.winning_line()) {
                writeln!(out, "{} wins along {}.", mark.symbol(), describe_line(line))?;
            }
        }
    }
    Ok(())
}

fn describe_line(line: Line) -> String {
    match line {
        Line::Column(c) => format!("column {}", c),
        Line::Row(r) => format!("row {}", r),
        Line::Diagonal => "the descending diagonal".to_string(),
        Line::AntiDiagonal => "the ascending diagonal".to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::{DecisionEngine, Mark};

    fn pvp() -> TurnController {
        let engine = DecisionEngine::with_seed(Strategy::ExhaustiveSearch, Mark::B, 1);
        TurnController::new(engine, Mode::HumanVsHuman)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("1 2"), Some(Command::Move { row: 1, col: 2 }));
        assert_eq!(parse_command("  0   0 "), Some(Command::Move { row: 0, col: 0 }));
        assert_eq!(parse_command("g"), Some(Command::ToggleMode));
        assert_eq!(parse_command("r"), Some(Command::Restart));
        assert_eq!(parse_command("0"), Some(Command::SetStrategy(Strategy::RandomChoice)));
        assert_eq!(parse_command("1"), Some(Command::SetStrategy(Strategy::ExhaustiveSearch)));
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("a b"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn test_game_loop_reports_win() {
        let mut game = pvp();
        let input = "0 0\n1 0\n0 1\n1 1\n0 2\nq\n";
        let mut out = Vec::new();
        game_loop(&mut game, input.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("X wins along row 0."));
        assert!(text.contains("The game has been exited."));
        assert!(game.is_game_over());
    }

    #[test]
    fn test_game_loop_rejects_occupied() {
        let mut game = pvp();
        let input = "1 1\n1 1\n";
        let mut out = Vec::new();
        game_loop(&mut game, input.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Invalid move: cell (1, 1) is already claimed"));
        assert_eq!(game.state().occupied_count(), 1);
    }

    #[test]
    fn test_build_config_flags_override() {
        let args = PlayArgs {
            config: None,
            mode: Some(ModeArg::Pvp),
            strategy: Some(StrategyArg::Random),
            engine: Some(MarkArg::X),
        };
        let config = build_config(&args, Some(5)).unwrap();
        assert_eq!(config.mode, Mode::HumanVsHuman);
        assert_eq!(config.strategy, Strategy::RandomChoice);
        assert_eq!(config.engine_player, Mark::A);
        assert_eq!(config.seed, Some(5));
    }
}
