//! Viewer-relative read model of a game.

use super::game::TicTacToe;
use super::types::Symbol;
use crate::session::SessionId;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// One side of the table as shown to a viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    /// Display name.
    pub name: String,
    /// Symbol that player marks with.
    pub symbol: Symbol,
}

/// Everything a seated player may see: their own seat, the opponent's,
/// whose turn it is and the flattened board. Nothing else leaks, in
/// particular no move history and no last-move marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    /// The viewer.
    pub you: SeatView,
    /// The other seated player.
    pub opponent: SeatView,
    /// Whether the viewer's symbol moves next.
    pub is_your_turn: bool,
    /// Nine cells, row-major, each `""`, `"X"` or `"O"`.
    pub board: Vec<String>,
}

impl GameView {
    /// Builds the view of `game` for `viewer`.
    ///
    /// # Errors
    ///
    /// Returns [`NotSeated`] if `viewer` holds neither seat.
    #[instrument(skip(game))]
    pub fn project(game: &TicTacToe, viewer: SessionId) -> Result<Self, NotSeated> {
        let Some(symbol) = game.symbol_of(viewer) else {
            warn!("Viewer is not seated in this game");
            return Err(NotSeated { viewer });
        };
        let seat_view = |symbol: Symbol| SeatView {
            name: game.seat(symbol).name().clone(),
            symbol,
        };

        Ok(Self {
            you: seat_view(symbol),
            opponent: seat_view(symbol.opponent()),
            is_your_turn: game.turn() == symbol,
            board: game
                .board()
                .squares()
                .map(|sq| sq.as_str().to_string())
                .collect(),
        })
    }
}

/// Terminal state of a game, shared by both seats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Somebody won or the board is full.
    pub over: bool,
    /// Full board, no winner.
    pub draw: bool,
    /// Winner's display name.
    pub winner: Option<String>,
}

impl GameSummary {
    /// Summarizes `game`.
    pub fn of(game: &TicTacToe) -> Self {
        Self {
            over: game.is_over(),
            draw: game.is_draw(),
            winner: game.winner().map(|seat| seat.name().clone()),
        }
    }
}

/// A projection was requested for a session that holds no seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[display("Session {} is not seated in this game", viewer)]
pub struct NotSeated {
    /// The rejected viewer.
    pub viewer: SessionId,
}

impl std::error::Error for NotSeated {}
