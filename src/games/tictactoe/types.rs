//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};

/// Number of rows and columns on the board.
pub const SIZE: usize = 3;

/// Mark a seated player writes onto the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Symbol {
    /// First seat, always moves first.
    X,
    /// Second seat.
    O,
}

impl Symbol {
    /// Returns the other symbol.
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    /// Seat index owning this symbol (X → 0, O → 1).
    pub fn seat_index(self) -> usize {
        match self {
            Symbol::X => 0,
            Symbol::O => 1,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Nobody has marked this cell.
    #[default]
    Empty,
    /// Cell holds a symbol.
    Occupied(Symbol),
}

impl Square {
    /// Wire form used by the player view: `""`, `"X"` or `"O"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Square::Empty => "",
            Square::Occupied(Symbol::X) => "X",
            Square::Occupied(Symbol::O) => "O",
        }
    }
}

/// 3x3 grid, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [[Square; SIZE]; SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the square at `(row, col)`, or `None` off the board.
    pub fn get(&self, row: usize, col: usize) -> Option<Square> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Writes a square. Returns `false` if `(row, col)` is off the board.
    pub fn set(&mut self, row: usize, col: usize, square: Square) -> bool {
        match self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(cell) => {
                *cell = square;
                true
            }
            None => false,
        }
    }

    /// Checks if the cell is on the board and unmarked.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Square::Empty))
    }

    /// Returns the rows of the grid.
    pub fn rows(&self) -> &[[Square; SIZE]; SIZE] {
        &self.cells
    }

    /// Iterates all nine squares in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.cells.iter().flatten().copied()
    }

    /// Clears every cell.
    pub fn clear(&mut self) {
        self.cells = [[Square::Empty; SIZE]; SIZE];
    }

    /// Formats the board as a human-readable string.
    pub fn display(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|sq| match sq {
                        Square::Empty => ".",
                        other => other.as_str(),
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n-+-+-\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_out_of_bounds_rejected() {
        let mut board = Board::new();
        assert!(!board.set(3, 0, Square::Occupied(Symbol::X)));
        assert!(!board.set(0, 3, Square::Occupied(Symbol::X)));
        assert!(board.squares().all(|s| s == Square::Empty));
    }

    #[test]
    fn test_squares_row_major() {
        let mut board = Board::new();
        board.set(1, 2, Square::Occupied(Symbol::O));
        let flat: Vec<_> = board.squares().collect();
        assert_eq!(flat[5], Square::Occupied(Symbol::O));
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set(0, 0, Square::Occupied(Symbol::X));
        board.set(2, 2, Square::Occupied(Symbol::O));
        assert_eq!(board.display(), "X|.|.\n-+-+-\n.|.|.\n-+-+-\n.|.|O");
    }

    #[test]
    fn test_symbol_opponent() {
        assert_eq!(Symbol::X.opponent(), Symbol::O);
        assert_eq!(Symbol::O.opponent(), Symbol::X);
    }
}
