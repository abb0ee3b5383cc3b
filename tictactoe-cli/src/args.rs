//! Command-line spellings of core enums

use clap::ValueEnum;

use tictactoe_core::{Mark, Mode, Strategy};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Two humans share the terminal
    Pvp,
    /// Human against the engine
    Ai,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Pvp => Mode::HumanVsHuman,
            ModeArg::Ai => Mode::HumanVsEngine,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Uniformly random empty cell
    Random,
    /// Exhaustive minimax
    Minimax,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Random => Strategy::RandomChoice,
            StrategyArg::Minimax => Strategy::ExhaustiveSearch,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MarkArg {
    X,
    O,
}

impl From<MarkArg> for Mark {
    fn from(arg: MarkArg) -> Self {
        match arg {
            MarkArg::X => Mark::A,
            MarkArg::O => Mark::B,
        }
    }
}
