//! TicTacToe Core - Game engine and AI
//!
//! This crate provides the core game logic:
//! - Board geometry (3x3 grid, marks, win lines)
//! - Game state with incremental occupancy and terminal detection
//! - Computer opponent (uniform random or exhaustive minimax)
//! - Turn/mode state machine driving human and engine moves

pub mod board;
pub mod game;
pub mod ai;
pub mod controller;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{Cell, Coord, Line, Mark, BOARD_SIZE, CELL_COUNT, LINES};
pub use game::{GameState, Grid, Outcome};
pub use ai::{minimax, play_game, search, DecisionEngine, Strategy, DRAW_SCORE, WIN_SCORE};
pub use controller::{Mode, TurnController};
pub use config::GameConfig;
pub use error::GameError;
