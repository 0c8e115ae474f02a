mod game;
mod types;
mod view;

pub mod rules;

pub use game::{Seat, TicTacToe};
pub use types::{Board, SIZE, Square, Symbol};
pub use view::{GameSummary, GameView, NotSeated, SeatView};
