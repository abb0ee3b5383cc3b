//! Computer opponent: uniform random play and exhaustive minimax

use crate::board::{Coord, Mark};
use crate::game::{GameState, Outcome};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score of a won position for A (B wins score the negation)
pub const WIN_SCORE: i32 = 1;

/// Score of a drawn position
pub const DRAW_SCORE: i32 = 0;

// ============================================================================
// STRATEGY
// ============================================================================

/// Move-selection policy (the difficulty level)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Pick any empty cell with equal probability
    RandomChoice,
    /// Full-depth minimax, never loses
    #[default]
    ExhaustiveSearch,
}

impl Strategy {
    /// The other difficulty level
    pub fn toggled(self) -> Self {
        match self {
            Strategy::RandomChoice => Strategy::ExhaustiveSearch,
            Strategy::ExhaustiveSearch => Strategy::RandomChoice,
        }
    }
}

// ============================================================================
// DECISION ENGINE
// ============================================================================

/// Computer player. Holds configuration and its RNG, never the board.
#[derive(Clone, Debug)]
pub struct DecisionEngine {
    strategy: Strategy,
    player: Mark,
    rng: ChaCha8Rng,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(Strategy::default(), Mark::B)
    }
}

impl DecisionEngine {
    pub fn new(strategy: Strategy, player: Mark) -> Self {
        Self {
            strategy,
            player,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(strategy: Strategy, player: Mark, seed: u64) -> Self {
        Self {
            strategy,
            player,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.strategy = strategy;
    }

    /// Mark this engine plays
    pub fn player(&self) -> Mark {
        self.player
    }

    pub fn set_player(&mut self, player: Mark) {
        self.player = player;
    }

    /// Pick a cell for this engine's mark.
    ///
    /// Returns None only on a finished board, which callers must never ask about.
    pub fn choose_move(&mut self, state: &GameState) -> Option<Coord> {
        if state.outcome().is_terminal() {
            return None;
        }

        match self.strategy {
            Strategy::RandomChoice => {
                let mv = random_move(state, &mut self.rng)?;
                tracing::debug!(player = ?self.player, cell = %mv, evaluation = "random", "engine move");
                Some(mv)
            }
            Strategy::ExhaustiveSearch => {
                let (score, mv) = search(state, self.player == Mark::A);
                let mv = mv?;
                tracing::debug!(player = ?self.player, cell = %mv, evaluation = score, "engine move");
                Some(mv)
            }
        }
    }

    /// Minimax value of a position with the side to move playing next.
    /// Positive favors A, negative favors B.
    pub fn evaluate(&self, state: &GameState) -> i32 {
        minimax(state, state.next_mark() == Mark::A).0
    }
}

/// Uniformly chosen empty cell
fn random_move(state: &GameState, rng: &mut ChaCha8Rng) -> Option<Coord> {
    let cells = state.empty_cells();
    if cells.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..cells.len());
    Some(cells[idx])
}

// ============================================================================
// MINIMAX
// ============================================================================

fn terminal_score(outcome: Outcome) -> Option<i32> {
    match outcome {
        Outcome::AWins => Some(WIN_SCORE),
        Outcome::BWins => Some(-WIN_SCORE),
        Outcome::Draw => Some(DRAW_SCORE),
        Outcome::None => None,
    }
}

fn mover(maximizing: bool) -> Mark {
    if maximizing {
        Mark::A
    } else {
        Mark::B
    }
}

/// Keep the first extremum in scan order
fn select_best(
    scored: impl Iterator<Item = (Coord, i32)>,
    maximizing: bool,
) -> (i32, Option<Coord>) {
    let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
    let mut best_move = None;

    for (mv, score) in scored {
        let improves = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if improves {
            best_score = score;
            best_move = Some(mv);
        }
    }

    (best_score, best_move)
}

/// Full-depth minimax. `maximizing` is true when A is to move.
///
/// Returns the score and the first best move in row-major order; terminal
/// positions return no move.
pub fn minimax(state: &GameState, maximizing: bool) -> (i32, Option<Coord>) {
    if let Some(score) = terminal_score(state.outcome()) {
        return (score, None);
    }

    let mark = mover(maximizing);
    let scored = state.empty_cells().into_iter().map(|mv| {
        let child = state.with_claim(mv, mark);
        (mv, minimax(&child, !maximizing).0)
    });

    select_best(scored, maximizing)
}

/// Root of the search. Top-level branches run on rayon when the
/// `parallel` feature is enabled; the reduction stays in scan order.
pub fn search(state: &GameState, maximizing: bool) -> (i32, Option<Coord>) {
    if let Some(score) = terminal_score(state.outcome()) {
        return (score, None);
    }

    let moves = state.empty_cells();
    let scores = root_scores(state, &moves, maximizing);
    select_best(moves.into_iter().zip(scores), maximizing)
}

#[cfg(feature = "parallel")]
fn root_scores(state: &GameState, moves: &[Coord], maximizing: bool) -> Vec<i32> {
    use rayon::prelude::*;

    let mark = mover(maximizing);
    moves
        .par_iter()
        .map(|&mv| minimax(&state.with_claim(mv, mark), !maximizing).0)
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn root_scores(state: &GameState, moves: &[Coord], maximizing: bool) -> Vec<i32> {
    let mark = mover(maximizing);
    moves
        .iter()
        .map(|&mv| minimax(&state.with_claim(mv, mark), !maximizing).0)
        .collect()
}

// ============================================================================
// PLAYOUT
// ============================================================================

/// Alternate two engines from `initial` until the game ends.
///
/// `cross` must play A and `circle` must play B.
pub fn play_game(
    cross: &mut DecisionEngine,
    circle: &mut DecisionEngine,
    initial: GameState,
) -> (GameState, Vec<Coord>) {
    debug_assert_eq!(cross.player(), Mark::A);
    debug_assert_eq!(circle.player(), Mark::B);

    let mut state = initial;
    let mut history = Vec::new();

    while state.outcome() == Outcome::None {
        let engine = match state.next_mark() {
            Mark::A => &mut *cross,
            Mark::B => &mut *circle,
        };
        let Some(mv) = engine.choose_move(&state) else {
            break;
        };
        if state.claim(mv.row, mv.col, engine.player()).is_err() {
            break;
        }
        history.push(mv);
    }

    (state, history)
}

// ============================================================================
// TESTS
// ============================================================================
