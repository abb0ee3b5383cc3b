//! Game state and terminal detection

use crate::board::{Cell, Coord, Line, Mark, BOARD_SIZE, CELL_COUNT, LINES};
use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Game outcome, derived from the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    None,
    AWins,
    BWins,
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::None
    }

    /// Winning mark, if any
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::AWins => Some(Mark::A),
            Outcome::BWins => Some(Mark::B),
            Outcome::None | Outcome::Draw => None,
        }
    }

    fn win_for(mark: Mark) -> Self {
        match mark {
            Mark::A => Outcome::AWins,
            Mark::B => Outcome::BWins,
        }
    }
}

pub type Grid = [[Cell; BOARD_SIZE]; BOARD_SIZE];

// ============================================================================
// GAME STATE
// ============================================================================

/// Board contents plus an incrementally maintained occupancy count.
///
/// `Copy` is cheap (nine bytes of cells and a counter), so search branches
/// each work on their own value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    grid: Grid,
    occupied: u8,
}

impl GameState {
    /// Empty board
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cell at coordinate, None when off the board
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.grid.get(coord.row)?.get(coord.col).copied()
    }

    /// Number of claimed cells
    pub fn occupied_count(&self) -> usize {
        self.occupied as usize
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == CELL_COUNT
    }

    /// Mark whose turn it is, counting from an A opening
    pub fn next_mark(&self) -> Mark {
        if self.occupied % 2 == 0 {
            Mark::A
        } else {
            Mark::B
        }
    }

    /// True iff the coordinate is on the board and unclaimed
    pub fn is_available(&self, row: usize, col: usize) -> bool {
        self.get(Coord::new(row, col)) == Some(Cell::Empty)
    }

    /// Unclaimed coordinates in row-major order
    pub fn empty_cells(&self) -> Vec<Coord> {
        let mut cells = Vec::with_capacity(CELL_COUNT - self.occupied_count());
        for (row, line) in self.grid.iter().enumerate() {
            for (col, cell) in line.iter().enumerate() {
                if cell.is_empty() {
                    cells.push(Coord::new(row, col));
                }
            }
        }
        cells
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Claim an empty cell for `mark`
    pub fn claim(&mut self, row: usize, col: usize, mark: Mark) -> Result<()> {
        let cell = self
            .grid
            .get_mut(row)
            .and_then(|line| line.get_mut(col))
            .ok_or(GameError::OutOfBounds { row, col })?;

        if !cell.is_empty() {
            return Err(GameError::Occupied { row, col });
        }

        *cell = Cell::Marked(mark);
        self.occupied += 1;
        Ok(())
    }

    /// Copy with `coord` claimed for `mark`; the caller guarantees the cell is empty
    pub(crate) fn with_claim(&self, coord: Coord, mark: Mark) -> Self {
        debug_assert!(self.is_available(coord.row, coord.col));
        let mut next = *self;
        next.grid[coord.row][coord.col] = Cell::Marked(mark);
        next.occupied += 1;
        next
    }

    /// Independent deep copy
    pub fn snapshot(&self) -> Self {
        *self
    }

    // ========================================================================
    // TERMINAL DETECTION
    // ========================================================================

    /// First completed line in scan order (columns, rows, diagonals)
    pub fn winning_line(&self) -> Option<(Line, Mark)> {
        LINES.into_iter().find_map(|line| {
            let [a, b, c] = line.cells().map(|coord| self.grid[coord.row][coord.col]);
            match a {
                Cell::Marked(mark) if a == b && b == c => Some((line, mark)),
                _ => None,
            }
        })
    }

    pub fn outcome(&self) -> Outcome {
        match self.winning_line() {
            Some((_, mark)) => Outcome::win_for(mark),
            None if self.is_full() => Outcome::Draw,
            None => Outcome::None,
        }
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, line) in self.grid.iter().enumerate() {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            let symbols: Vec<String> = line.iter().map(|c| format!(" {} ", c.symbol())).collect();
            writeln!(f, "{}", symbols.join("|"))?;
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
