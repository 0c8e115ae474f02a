//! Tic-tac-toe engine for one paired game.
//!
//! The engine owns the grid, whose turn it is and the terminal state. It
//! knows the two seated players only as opaque [`Seat`] records and never
//! checks who is calling [`TicTacToe::mark`]; that belongs to the caller.

use super::rules::{check_winner, is_full};
use super::types::{Board, Square, Symbol};
use super::view::{GameView, NotSeated};
use crate::session::SessionId;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// A player seated in a game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct Seat {
    /// Session that owns the seat.
    id: SessionId,
    /// Display name supplied at session creation.
    #[new(into)]
    name: String,
}

/// Tic-tac-toe game between two seats.
///
/// Seat 0 always plays [`Symbol::X`] and moves first; seat 1 plays
/// [`Symbol::O`]. Seats are fixed for the life of the game, including
/// across [`TicTacToe::reset`].
#[derive(Debug, Clone)]
pub struct TicTacToe {
    seats: [Seat; 2],
    board: Board,
    turn: Symbol,
    winner: Option<Symbol>,
}

impl TicTacToe {
    /// Creates a fresh game: `first` plays X, `second` plays O.
    #[instrument(skip_all, fields(x = %first.id(), o = %second.id()))]
    pub fn new(first: Seat, second: Seat) -> Self {
        info!("Creating tic-tac-toe game");
        Self {
            seats: [first, second],
            board: Board::new(),
            turn: Symbol::X,
            winner: None,
        }
    }

    /// Marks `(row, col)` with the symbol whose turn it is.
    ///
    /// Returns `false` without touching any state if the cell is off the
    /// board, already occupied, or the game is over.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn mark(&mut self, row: usize, col: usize) -> bool {
        if self.is_over() {
            debug!("Rejected mark: game is over");
            return false;
        }
        if !self.board.is_empty(row, col) {
            debug!("Rejected mark: cell occupied or off the board");
            return false;
        }

        self.board.set(row, col, Square::Occupied(self.turn));

        if let Some(symbol) = check_winner(&self.board) {
            info!(winner = %symbol, "Game won");
            self.winner = Some(symbol);
        } else if is_full(&self.board) {
            info!("Game drawn");
        }

        self.turn = self.turn.opponent();
        true
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the symbol that moves next.
    pub fn turn(&self) -> Symbol {
        self.turn
    }

    /// Returns the winning seat, if any.
    pub fn winner(&self) -> Option<&Seat> {
        self.winner.map(|symbol| self.seat(symbol))
    }

    /// Returns the winning symbol, if any.
    pub fn winning_symbol(&self) -> Option<Symbol> {
        self.winner
    }

    /// True once somebody has won or the board is full.
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || is_full(&self.board)
    }

    /// True when the board is full and nobody won.
    pub fn is_draw(&self) -> bool {
        self.winner.is_none() && is_full(&self.board)
    }

    /// Clears the board for another round, keeping the seats.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!("Resetting game");
        self.board.clear();
        self.turn = Symbol::X;
        self.winner = None;
    }

    /// Returns the seat playing `symbol`.
    pub fn seat(&self, symbol: Symbol) -> &Seat {
        &self.seats[symbol.seat_index()]
    }

    /// Returns both seats, X first.
    pub fn seats(&self) -> &[Seat; 2] {
        &self.seats
    }

    /// Returns the symbol played by `id`, or `None` if not seated here.
    pub fn symbol_of(&self, id: SessionId) -> Option<Symbol> {
        [Symbol::X, Symbol::O]
            .into_iter()
            .find(|&symbol| *self.seat(symbol).id() == id)
    }

    /// Projects the game as seen by `viewer`.
    ///
    /// # Errors
    ///
    /// Returns [`NotSeated`] if `viewer` holds neither seat.
    pub fn view_for(&self, viewer: SessionId) -> Result<GameView, NotSeated> {
        GameView::project(self, viewer)
    }
}
