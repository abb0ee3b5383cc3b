//! Grid geometry: cells, marks, coordinates and win lines

use serde::{Deserialize, Serialize};

/// Board side length
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// A player's symbol
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Cross, always moves first
    A,
    /// Circle
    B,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::A => Mark::B,
            Mark::B => Mark::A,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::A => 'X',
            Mark::B => 'O',
        }
    }
}

/// Contents of a single cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Marked(Mark),
}

impl Cell {
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Marked(mark) => Some(mark),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Marked(mark) => mark.symbol(),
        }
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        Cell::Marked(mark)
    }
}

/// Row-major grid position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check if this coordinate is on the board
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Center of the board
    pub const fn center() -> Self {
        Self::new(BOARD_SIZE / 2, BOARD_SIZE / 2)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A line of three cells that wins the game when filled by one mark
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Line {
    Column(usize),
    Row(usize),
    /// Top-left to bottom-right
    Diagonal,
    /// Bottom-left to top-right
    AntiDiagonal,
}

/// Every win line in scan order: columns, rows, then both diagonals
pub const LINES: [Line; 8] = [
    Line::Column(0),
    Line::Column(1),
    Line::Column(2),
    Line::Row(0),
    Line::Row(1),
    Line::Row(2),
    Line::Diagonal,
    Line::AntiDiagonal,
];

impl Line {
    /// The three coordinates covered by this line
    pub fn cells(self) -> [Coord; BOARD_SIZE] {
        match self {
            Line::Column(c) => [Coord::new(0, c), Coord::new(1, c), Coord::new(2, c)],
            Line::Row(r) => [Coord::new(r, 0), Coord::new(r, 1), Coord::new(r, 2)],
            Line::Diagonal => [Coord::new(0, 0), Coord::new(1, 1), Coord::new(2, 2)],
            Line::AntiDiagonal => [Coord::new(2, 0), Coord::new(1, 1), Coord::new(0, 2)],
        }
    }
}
