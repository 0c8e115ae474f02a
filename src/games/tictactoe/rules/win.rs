//! Win detection logic for tic-tac-toe.

use super::super::{Board, Square, Symbol};
use tracing::instrument;

/// Every line that wins: rows, then columns, then diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(symbol)` for the first completed line of identical
/// non-empty squares, `None` otherwise.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<Symbol> {
    LINES.iter().find_map(|&[a, b, c]| {
        let sq = board.get(a.0, a.1)?;
        match sq {
            Square::Occupied(symbol)
                if board.get(b.0, b.1) == Some(sq) && board.get(c.0, c.1) == Some(sq) =>
            {
                Some(symbol)
            }
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(symbol: Symbol, cells: &[(usize, usize)]) -> Board {
        let mut board = Board::new();
        for &(r, c) in cells {
            board.set(r, c, Square::Occupied(symbol));
        }
        board
    }

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(check_winner(&Board::new()), None);
    }

    #[test]
    fn test_every_line_wins() {
        for line in LINES {
            let board = board_with(Symbol::O, &line);
            assert_eq!(check_winner(&board), Some(Symbol::O), "line {line:?}");
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let mut board = board_with(Symbol::X, &[(0, 0), (0, 1)]);
        board.set(0, 2, Square::Occupied(Symbol::O));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_no_winner_incomplete() {
        let board = board_with(Symbol::X, &[(0, 0), (1, 1)]);
        assert_eq!(check_winner(&board), None);
    }
}
