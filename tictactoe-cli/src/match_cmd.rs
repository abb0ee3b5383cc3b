//! Match command - play engine against engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tictactoe_core::{play_game, Coord, DecisionEngine, GameState, Mark, Outcome, Strategy};

use crate::args::StrategyArg;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Strategy for the X engine (moves first)
    #[arg(long, value_enum, default_value = "minimax")]
    pub cross: StrategyArg,

    /// Strategy for the O engine
    #[arg(long, value_enum, default_value = "minimax")]
    pub circle: StrategyArg,

    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    outcome: Outcome,
    moves: Vec<Coord>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    cross_wins: usize,
    circle_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting match: {:?} vs {:?} ({} games)",
        args.cross,
        args.circle,
        args.games
    );

    let results = play_match(args.cross.into(), args.circle.into(), args.games, seed);

    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games in the match
fn play_match(cross: Strategy, circle: Strategy, games: usize, seed: Option<u64>) -> MatchResults {
    let mut rng = create_rng(seed);
    let mut records = Vec::with_capacity(games);

    for game_num in 0..games {
        let record = play_single_game(cross, circle, game_num + 1, &mut rng);

        tracing::info!(
            "Game {}: {:?} ({} moves)",
            record.game_number,
            record.outcome,
            record.moves.len()
        );

        records.push(record);
    }

    compute_match_statistics(records)
}

/// Report match results
fn report_results(results: &MatchResults, json: bool) -> Result<()> {
    if json {
        print_json_results(results)
    } else {
        print_text_results(results);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game with freshly seeded engines
fn play_single_game(
    cross: Strategy,
    circle: Strategy,
    game_number: usize,
    rng: &mut ChaCha8Rng,
) -> GameRecord {
    let mut cross_engine = DecisionEngine::with_seed(cross, Mark::A, rng.gen());
    let mut circle_engine = DecisionEngine::with_seed(circle, Mark::B, rng.gen());

    let (final_state, moves) = play_game(&mut cross_engine, &mut circle_engine, GameState::new());

    GameRecord {
        game_number,
        outcome: final_state.outcome(),
        moves,
    }
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let cross_wins = games.iter().filter(|g| g.outcome == Outcome::AWins).count();
    let circle_wins = games.iter().filter(|g| g.outcome == Outcome::BWins).count();
    let draws = games.iter().filter(|g| g.outcome == Outcome::Draw).count();

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        cross_wins,
        circle_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        outcome: Outcome,
        moves: Vec<Coord>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        cross_wins: usize,
        circle_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        cross_wins: results.cross_wins,
        circle_wins: results.circle_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                outcome: g.outcome,
                moves: g.moves.clone(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!("X wins:      {} ({:.1}%)", results.cross_wins, percent(results.cross_wins, total));
    println!("O wins:      {} ({:.1}%)", results.circle_wins, percent(results.circle_wins, total));
    println!("Draws:       {} ({:.1}%)", results.draws, percent(results.draws, total));
    println!("Avg moves:   {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} moves",
            game.game_number,
            game.outcome,
            game.moves.len()
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
