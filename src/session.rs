//! Session registry and matchmaker.
//!
//! Every anonymous player gets a [`Session`]. The registry keeps at most one
//! session in the pending slot; the next session created is paired with it
//! immediately and both share one [`TicTacToe`] game.

use crate::games::tictactoe::{GameSummary, GameView, NotSeated, Seat, TicTacToe};
use derive_getters::Getters;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument, warn};

/// Identifier of a session. Allocated from 1 upward and never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    /// Returns the raw integer.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::str::FromStr for SessionId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Matchmaking status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    /// Holding the pending slot, no opponent yet.
    Waiting,
    /// Paired; a game is attached.
    Playing,
}

/// Game shared by the two sessions it pairs.
pub type SharedGame = Arc<Mutex<TicTacToe>>;

/// A player's session.
#[derive(Debug, Clone, Getters)]
pub struct Session {
    /// Session ID.
    id: SessionId,
    /// Display name, not validated.
    player_name: String,
    /// Waiting or playing.
    status: SessionStatus,
    /// The game, present iff `status` is `Playing`.
    game: Option<SharedGame>,
}

#[derive(Debug)]
struct Registry {
    next_id: u64,
    sessions: HashMap<SessionId, Session>,
    waiting: Option<SessionId>,
}

/// Owns every session and performs the pairing.
///
/// Cloning is cheap and every clone refers to the same registry, so one
/// instance can be handed to the transport layer at startup.
#[derive(Debug, Clone)]
pub struct Sessions {
    inner: Arc<Mutex<Registry>>,
}

impl Sessions {
    /// Creates an empty registry. The first session gets ID 1.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating session registry");
        Self {
            inner: Arc::new(Mutex::new(Registry {
                next_id: 1,
                sessions: HashMap::new(),
                waiting: None,
            })),
        }
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Creates a session for `player_name` and returns its ID.
    ///
    /// If another session holds the pending slot, both become `playing`
    /// and share a new game with the pending one as X. Otherwise the new
    /// session takes the pending slot. The whole check-and-pair runs under
    /// the registry lock, so concurrent callers never both pair with, or
    /// both claim, the same slot.
    #[instrument(skip_all)]
    pub fn create_session(&self, player_name: impl Into<String>) -> SessionId {
        let player_name = player_name.into();

        let mut registry = self.registry();
        let id = SessionId(registry.next_id);
        registry.next_id += 1;

        let mut session = Session {
            id,
            player_name,
            status: SessionStatus::Waiting,
            game: None,
        };

        let pending = registry
            .waiting
            .take()
            .and_then(|pending_id| registry.sessions.get_mut(&pending_id));

        match pending {
            Some(pending) => {
                let game = Arc::new(Mutex::new(TicTacToe::new(
                    Seat::new(pending.id, pending.player_name.clone()),
                    Seat::new(id, session.player_name.clone()),
                )));
                pending.status = SessionStatus::Playing;
                pending.game = Some(Arc::clone(&game));
                session.status = SessionStatus::Playing;
                session.game = Some(game);

                info!(x = %pending.id, o = %id, "Paired sessions");
            }
            None => {
                registry.waiting = Some(id);
                info!(session_id = %id, "Session waiting for an opponent");
            }
        }

        registry.sessions.insert(id, session);
        id
    }

    /// Gets a session by ID.
    #[instrument(skip(self))]
    pub fn get_session(&self, id: SessionId) -> Option<Session> {
        let session = self.registry().sessions.get(&id).cloned();
        if session.is_none() {
            debug!("Session not found");
        }
        session
    }

    /// Removes a session, returning it if it existed.
    ///
    /// If it held the pending slot, the slot is left empty. A paired
    /// partner keeps its game.
    #[instrument(skip(self))]
    pub fn remove_session(&self, id: SessionId) -> Option<Session> {
        let mut registry = self.registry();
        if registry.waiting == Some(id) {
            registry.waiting = None;
            debug!("Cleared pending slot");
        }
        let removed = registry.sessions.remove(&id);
        if removed.is_some() {
            info!("Removed session");
        }
        removed
    }

    /// Checks that a session exists.
    #[instrument(skip(self))]
    pub fn is_valid_session(&self, id: SessionId) -> bool {
        self.registry().sessions.contains_key(&id)
    }

    /// Returns the session's status, or `None` for an unknown ID.
    #[instrument(skip(self))]
    pub fn status(&self, id: SessionId) -> Option<SessionStatus> {
        self.registry().sessions.get(&id).map(|s| s.status)
    }

    /// Returns the session currently holding the pending slot.
    pub fn waiting_session(&self) -> Option<SessionId> {
        self.registry().waiting
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.registry().sessions.len()
    }

    /// True when no sessions exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the game attached to a playing session.
    fn game(&self, id: SessionId) -> Result<SharedGame, SessionError> {
        let registry = self.registry();
        let session = registry
            .sessions
            .get(&id)
            .ok_or(SessionError::UnknownSession(id))?;
        session.game.clone().ok_or(SessionError::NotPlaying(id))
    }

    /// Projects the session's game from its own point of view.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownSession`] or [`SessionError::NotPlaying`]
    /// when there is no game to show.
    #[instrument(skip(self))]
    pub fn game_state(&self, id: SessionId) -> Result<GameView, SessionError> {
        let game = self.game(id)?;
        let game = lock_game(&game);
        Ok(game.view_for(id)?)
    }

    /// Reports whether the session's game is finished and who won.
    #[instrument(skip(self))]
    pub fn game_summary(&self, id: SessionId) -> Result<GameSummary, SessionError> {
        let game = self.game(id)?;
        let game = lock_game(&game);
        Ok(GameSummary::of(&game))
    }

    /// Plays a move for the session at `(row, col)`.
    ///
    /// Unlike [`TicTacToe::mark`], this checks that the session's symbol
    /// is the one to move.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotYourTurn`] out of turn, [`SessionError::IllegalMove`]
    /// when the engine refuses the cell, plus the lookup errors of
    /// [`Sessions::game_state`].
    #[instrument(skip(self))]
    pub fn submit_move(
        &self,
        id: SessionId,
        row: usize,
        col: usize,
    ) -> Result<GameView, SessionError> {
        let game = self.game(id)?;
        let mut game = lock_game(&game);

        let symbol = game.symbol_of(id).ok_or(NotSeated { viewer: id })?;
        if game.turn() != symbol {
            warn!(expected = %game.turn(), actual = %symbol, "Move out of turn");
            return Err(SessionError::NotYourTurn(id));
        }
        if !game.mark(row, col) {
            warn!("Move rejected by engine");
            return Err(SessionError::IllegalMove { row, col });
        }

        info!(symbol = %symbol, over = game.is_over(), "Move accepted");
        Ok(game.view_for(id)?)
    }

    /// Starts a new round in the session's finished game.
    ///
    /// # Errors
    ///
    /// [`SessionError::GameInProgress`] while the current round is still
    /// being played, plus the lookup errors of [`Sessions::game_state`].
    #[instrument(skip(self))]
    pub fn reset_game(&self, id: SessionId) -> Result<(), SessionError> {
        let game = self.game(id)?;
        let mut game = lock_game(&game);
        if !game.is_over() {
            return Err(SessionError::GameInProgress(id));
        }
        game.reset();
        Ok(())
    }
}

impl Default for Sessions {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_game(game: &SharedGame) -> MutexGuard<'_, TicTacToe> {
    game.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Failure of a registry operation that needs a game.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum SessionError {
    /// No session with this ID.
    #[display("Unknown session {}", _0)]
    UnknownSession(SessionId),

    /// The session has not been paired yet.
    #[display("Session {} is not playing", _0)]
    NotPlaying(SessionId),

    /// The other player is to move.
    #[display("It is not session {}'s turn", _0)]
    NotYourTurn(SessionId),

    /// The engine refused the cell.
    #[display("Illegal move at row {}, column {}", row, col)]
    IllegalMove {
        /// Row requested.
        row: usize,
        /// Column requested.
        col: usize,
    },

    /// The round is not finished yet.
    #[display("Game for session {} is still in progress", _0)]
    GameInProgress(SessionId),

    /// The session holds no seat in the game attached to it.
    #[display("{}", _0)]
    #[from]
    NotSeated(NotSeated),
}

impl std::error::Error for SessionError {}
