//! Game configuration

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::ai::{DecisionEngine, Strategy};
use crate::board::Mark;
use crate::controller::Mode;

/// Settings a session starts with
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Human vs human, or human vs engine
    pub mode: Mode,
    /// Engine difficulty
    pub strategy: Strategy,
    /// Mark the engine plays
    pub engine_player: Mark,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: Mode::HumanVsEngine,
            strategy: Strategy::ExhaustiveSearch,
            engine_player: Mark::B,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_engine_player(mut self, player: Mark) -> Self {
        self.engine_player = player;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the engine this config describes
    pub fn engine(&self) -> DecisionEngine {
        match self.seed {
            Some(seed) => DecisionEngine::with_seed(self.strategy, self.engine_player, seed),
            None => DecisionEngine::new(self.strategy, self.engine_player),
        }
    }

    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.mode, Mode::HumanVsEngine);
        assert_eq!(config.strategy, Strategy::ExhaustiveSearch);
        assert_eq!(config.engine_player, Mark::B);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builders() {
        let config = GameConfig::default()
            .with_mode(Mode::HumanVsHuman)
            .with_strategy(Strategy::RandomChoice)
            .with_engine_player(Mark::A)
            .with_seed(9);
        assert_eq!(config.mode, Mode::HumanVsHuman);
        assert_eq!(config.strategy, Strategy::RandomChoice);
        assert_eq!(config.engine_player, Mark::A);
        assert_eq!(config.seed, Some(9));

        let engine = config.engine();
        assert_eq!(engine.player(), Mark::A);
        assert_eq!(engine.strategy(), Strategy::RandomChoice);
    }

    #[test]
    fn test_partial_json() {
        let config: GameConfig = serde_json::from_str(r#"{"strategy": "RandomChoice"}"#).unwrap();
        assert_eq!(config.strategy, Strategy::RandomChoice);
        assert_eq!(config.mode, Mode::HumanVsEngine);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load(Path::new("/nonexistent/tictactoe.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
