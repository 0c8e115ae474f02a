//! Anonymous matchmaking for two-player tic-tac-toe.
//!
//! # Architecture
//!
//! - **Games**: the tic-tac-toe engine and the per-viewer projection of it
//! - **Session**: session registry; pairs each new session with the pending one
//! - **Server**: thin axum transport, identity carried in a cookie
//! - **Config**: server settings from TOML, environment and flags
//!
//! # Example
//!
//! ```
//! use ttt_matchmaker::{SessionStatus, Sessions};
//!
//! let sessions = Sessions::new();
//! let alice = sessions.create_session("Alice");
//! assert_eq!(sessions.status(alice), Some(SessionStatus::Waiting));
//!
//! let bob = sessions.create_session("Bob");
//! assert_eq!(sessions.status(alice), Some(SessionStatus::Playing));
//!
//! let view = sessions.game_state(bob).unwrap();
//! assert_eq!(view.opponent.name, "Alice");
//! assert!(!view.is_your_turn);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod server;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, PORT_ENV, ServerConfig};

// Crate-level exports - HTTP transport
pub use server::{
    Caller, LoginForm, MoveRequest, SESSION_COOKIE, StatusResponse, router, session_id_from_headers,
};

// Crate-level exports - Session registry
pub use session::{Session, SessionError, SessionId, SessionStatus, Sessions, SharedGame};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, GameSummary, GameView, NotSeated, SIZE, Seat, SeatView, Square, Symbol, TicTacToe, rules,
};
