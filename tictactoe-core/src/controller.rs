//! Turn and mode state machine

use serde::{Deserialize, Serialize};

use crate::ai::{DecisionEngine, Strategy};
use crate::board::{Coord, Line, Mark};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::game::{GameState, Grid, Outcome};

/// Who plays against the human
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    HumanVsHuman,
    #[default]
    HumanVsEngine,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::HumanVsHuman => Mode::HumanVsEngine,
            Mode::HumanVsEngine => Mode::HumanVsHuman,
        }
    }
}

/// Sole owner of the board and the engine.
///
/// A human move and the engine's automatic reply happen inside one
/// `submit_human_move` call, so no caller can observe the board in between.
#[derive(Debug)]
pub struct TurnController {
    state: GameState,
    engine: DecisionEngine,
    active: Mark,
    mode: Mode,
    over: bool,
    last_engine_move: Option<Coord>,
}

impl Default for TurnController {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl TurnController {
    pub fn new(engine: DecisionEngine, mode: Mode) -> Self {
        let mut controller = Self {
            state: GameState::new(),
            engine,
            active: Mark::A,
            mode,
            over: false,
            last_engine_move: None,
        };
        controller.engine_reply();
        controller
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.engine(), config.mode)
    }

    // ========================================================================
    // INPUT EVENTS
    // ========================================================================

    /// Claim a cell for the active mark, then let the engine answer if it is its turn
    pub fn submit_human_move(&mut self, row: usize, col: usize) -> Result<()> {
        if self.over {
            return Err(GameError::GameOver);
        }

        self.state.claim(row, col, self.active)?;
        self.last_engine_move = None;
        tracing::debug!(player = ?self.active, row, col, "human move");

        self.advance();
        self.engine_reply();
        Ok(())
    }

    /// Fresh board, A to move. Mode and strategy carry over.
    pub fn restart(&mut self) {
        self.state = GameState::new();
        self.active = Mark::A;
        self.over = false;
        self.last_engine_move = None;
        tracing::info!("New game has started");

        self.engine_reply();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        tracing::info!(?mode, "mode changed");

        self.engine_reply();
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.engine.set_strategy(strategy);
        tracing::info!(?strategy, "strategy changed");
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn current_grid(&self) -> &Grid {
        self.state.grid()
    }

    pub fn current_outcome(&self) -> Outcome {
        self.state.outcome()
    }

    pub fn active_player(&self) -> Mark {
        self.active
    }

    pub fn is_game_over(&self) -> bool {
        self.over
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn strategy(&self) -> Strategy {
        self.engine.strategy()
    }

    pub fn engine_player(&self) -> Mark {
        self.engine.player()
    }

    /// Cell the engine claimed in response to the latest input, if any
    pub fn last_engine_move(&self) -> Option<Coord> {
        self.last_engine_move
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn winning_line(&self) -> Option<(Line, Mark)> {
        self.state.winning_line()
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    fn advance(&mut self) {
        self.active = self.active.opponent();

        let outcome = self.state.outcome();
        if outcome.is_terminal() {
            self.over = true;
            tracing::info!(?outcome, moves = self.state.occupied_count(), "game over");
        }
    }

    fn engine_reply(&mut self) {
        if self.over || self.mode != Mode::HumanVsEngine || self.active != self.engine.player() {
            return;
        }

        let Some(mv) = self.engine.choose_move(&self.state) else {
            unreachable!("engine asked to move on a finished board");
        };
        if let Err(err) = self.state.claim(mv.row, mv.col, self.active) {
            unreachable!("engine chose an unavailable cell: {err}");
        }
        self.last_engine_move = Some(mv);

        self.advance();
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    fn pvp() -> TurnController {
        let engine = DecisionEngine::with_seed(Strategy::ExhaustiveSearch, Mark::B, 1);
        TurnController::new(engine, Mode::HumanVsHuman)
    }

    fn vs_engine(strategy: Strategy) -> TurnController {
        let engine = DecisionEngine::with_seed(strategy, Mark::B, 1);
        TurnController::new(engine, Mode::HumanVsEngine)
    }

    #[test]
    fn test_initial_state() {
        let game = TurnController::default();
        assert_eq!(game.active_player(), Mark::A);
        assert_eq!(game.mode(), Mode::HumanVsEngine);
        assert_eq!(game.strategy(), Strategy::ExhaustiveSearch);
        assert!(!game.is_game_over());
        assert!(game.state().is_empty());
    }

    #[test]
    fn test_pvp_alternates() {
        let mut game = pvp();
        game.submit_human_move(0, 0).unwrap();
        assert_eq!(game.active_player(), Mark::B);
        game.submit_human_move(1, 1).unwrap();
        assert_eq!(game.active_player(), Mark::A);
        assert_eq!(game.current_grid()[0][0], Cell::Marked(Mark::A));
        assert_eq!(game.current_grid()[1][1], Cell::Marked(Mark::B));
        assert_eq!(game.last_engine_move(), None);
    }

    #[test]
    fn test_invalid_moves_leave_state_unchanged() {
        let mut game = pvp();
        game.submit_human_move(0, 0).unwrap();
        let before = *game.state();

        assert_eq!(
            game.submit_human_move(0, 0),
            Err(GameError::Occupied { row: 0, col: 0 })
        );
        assert_eq!(
            game.submit_human_move(5, 1),
            Err(GameError::OutOfBounds { row: 5, col: 1 })
        );
        assert_eq!(*game.state(), before);
        assert_eq!(game.active_player(), Mark::B);
    }

    #[test]
    fn test_engine_replies_immediately() {
        let mut game = vs_engine(Strategy::ExhaustiveSearch);
        game.submit_human_move(0, 0).unwrap();
        assert_eq!(game.last_engine_move(), Some(Coord::center()));
        assert_eq!(game.state().occupied_count(), 2);
        assert_eq!(game.active_player(), Mark::A);
    }

    #[test]
    fn test_win_ends_game() {
        let mut game = pvp();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.submit_human_move(row, col).unwrap();
        }
        assert!(game.is_game_over());
        assert_eq!(game.current_outcome(), Outcome::AWins);
        assert_eq!(game.winning_line(), Some((Line::Row(0), Mark::A)));
        assert_eq!(game.submit_human_move(2, 2), Err(GameError::GameOver));
        assert_eq!(game.state().occupied_count(), 5);
    }

    #[test]
    fn test_restart_resets() {
        let mut game = pvp();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            game.submit_human_move(row, col).unwrap();
        }
        game.restart();
        assert!(!game.is_game_over());
        assert_eq!(game.active_player(), Mark::A);
        assert!(game.state().is_empty());
        assert_eq!(game.current_outcome(), Outcome::None);
        assert_eq!(game.mode(), Mode::HumanVsHuman);
    }

    #[test]
    fn test_mode_toggle_on_engine_turn_moves() {
        let mut game = pvp();
        game.submit_human_move(0, 0).unwrap();
        assert_eq!(game.active_player(), Mark::B);

        game.set_mode(Mode::HumanVsEngine);
        assert_eq!(game.last_engine_move(), Some(Coord::center()));
        assert_eq!(game.active_player(), Mark::A);
        assert_eq!(game.state().occupied_count(), 2);
    }

    #[test]
    fn test_mode_toggle_on_human_turn_waits() {
        let mut game = pvp();
        game.toggle_mode();
        assert_eq!(game.mode(), Mode::HumanVsEngine);
        assert!(game.state().is_empty());
        assert_eq!(game.last_engine_move(), None);
    }

    #[test]
    fn test_mode_toggle_after_game_over_does_nothing() {
        let mut game = pvp();
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (2, 2)] {
            let _ = game.submit_human_move(row, col);
        }
        assert!(game.is_game_over());
        game.set_mode(Mode::HumanVsEngine);
        assert_eq!(game.state().occupied_count(), 5);
    }

    #[test]
    fn test_strategy_toggle_does_not_move() {
        let mut game = pvp();
        game.submit_human_move(0, 0).unwrap();
        game.set_strategy(Strategy::RandomChoice);
        assert_eq!(game.strategy(), Strategy::RandomChoice);
        assert_eq!(game.state().occupied_count(), 1);
    }

    #[test]
    fn test_engine_as_cross_opens() {
        let engine = DecisionEngine::with_seed(Strategy::ExhaustiveSearch, Mark::A, 1);
        let mut game = TurnController::new(engine, Mode::HumanVsEngine);
        assert_eq!(game.last_engine_move(), Some(Coord::new(0, 0)));
        assert_eq!(game.active_player(), Mark::B);

        game.restart();
        assert_eq!(game.state().occupied_count(), 1);
        assert_eq!(game.active_player(), Mark::B);
    }

    #[test]
    fn test_random_engine_game_finishes() {
        let mut game = vs_engine(Strategy::RandomChoice);
        while !game.is_game_over() {
            let mv = game.state().empty_cells()[0];
            game.submit_human_move(mv.row, mv.col).unwrap();
        }
        assert!(game.current_outcome().is_terminal());
    }
}
