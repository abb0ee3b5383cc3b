//! Move rejection errors

/// Reasons a move is refused. Every variant leaves the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("cell ({row}, {col}) is already claimed")]
    Occupied { row: usize, col: usize },

    #[error("cell ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("game is already over")]
    GameOver,
}

impl GameError {
    /// All current variants are invalid-move rejections
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            GameError::Occupied { .. } | GameError::OutOfBounds { .. } | GameError::GameOver
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
