//! HTTP transport over the session registry.
//!
//! The caller's identity travels in a `sessionId` cookie. Routes are gated
//! by middleware that only ever asks the registry [`Sessions::is_valid_session`]
//! and [`Sessions::status`]; game data comes from [`Sessions::game_state`],
//! [`Sessions::game_summary`], [`Sessions::submit_move`] and
//! [`Sessions::reset_game`].

use crate::session::{SessionError, SessionId, SessionStatus, Sessions};
use axum::{
    Form, Json, Router,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::{get, get_service, post},
};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, instrument, warn};

/// Name of the cookie carrying the session ID.
pub const SESSION_COOKIE: &str = "sessionId";

/// Login form body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    /// Display name for the new session.
    pub name: String,
}

/// Move request body. Row and column are zero-based.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Row, 0-2.
    pub row: usize,
    /// Column, 0-2.
    pub col: usize,
}

/// Body of `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Status of the caller's session.
    pub status: Option<SessionStatus>,
}

/// Session ID taken from the request cookies, if any parses.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Option<SessionId>);

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Caller(session_id_from_headers(&parts.headers)))
    }
}

/// Extracts the session ID from the `Cookie` headers.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}

/// Builds the application router.
///
/// `static_dir` must contain `login.html`, `waiting.html` and `game.html`;
/// anything else in it is served as-is.
#[instrument(skip(sessions, static_dir), fields(static_dir = %static_dir.display()))]
pub fn router(sessions: Sessions, static_dir: &Path) -> Router {
    info!("Building router");

    let guest = Router::new()
        .route(
            "/login",
            get_service(ServeFile::new(static_dir.join("login.html"))).post(handle_login),
        )
        .route_layer(middleware::from_fn_with_state(sessions.clone(), ensure_guest));

    let waiting = Router::new()
        .route("/waiting", get_service(ServeFile::new(static_dir.join("waiting.html"))))
        .route_layer(middleware::from_fn_with_state(sessions.clone(), ensure_waiting_player));

    let playing = Router::new()
        .route("/home", get_service(ServeFile::new(static_dir.join("game.html"))))
        .route("/game-state", get(game_state))
        .route("/game-summary", get(game_summary))
        .route("/move", post(submit_move))
        .route("/rematch", post(rematch))
        .route_layer(middleware::from_fn_with_state(sessions.clone(), ensure_active_player));

    let authenticated = Router::new()
        .route("/", get(serve_index))
        .route("/status", get(status))
        .merge(waiting)
        .merge(playing)
        .route_layer(middleware::from_fn_with_state(sessions.clone(), ensure_authenticated));

    Router::new()
        .merge(guest)
        .merge(authenticated)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(sessions)
}

// ─────────────────────────────────────────────────────────────
//  Route gates
// ─────────────────────────────────────────────────────────────

async fn ensure_authenticated(
    State(sessions): State<Sessions>,
    request: Request,
    next: Next,
) -> Response {
    match session_id_from_headers(request.headers()) {
        Some(id) if sessions.is_valid_session(id) => next.run(request).await,
        other => {
            debug!(session_id = ?other, "Unauthenticated request");
            Redirect::to("/login").into_response()
        }
    }
}

async fn ensure_guest(State(sessions): State<Sessions>, request: Request, next: Next) -> Response {
    match session_id_from_headers(request.headers()) {
        Some(id) if sessions.is_valid_session(id) => Redirect::to("/").into_response(),
        _ => next.run(request).await,
    }
}

async fn ensure_waiting_player(
    State(sessions): State<Sessions>,
    request: Request,
    next: Next,
) -> Response {
    require_status(&sessions, request, next, SessionStatus::Waiting).await
}

async fn ensure_active_player(
    State(sessions): State<Sessions>,
    request: Request,
    next: Next,
) -> Response {
    require_status(&sessions, request, next, SessionStatus::Playing).await
}

async fn require_status(
    sessions: &Sessions,
    request: Request,
    next: Next,
    wanted: SessionStatus,
) -> Response {
    let status = session_id_from_headers(request.headers()).and_then(|id| sessions.status(id));
    if status == Some(wanted) {
        next.run(request).await
    } else {
        debug!(?status, %wanted, "Status gate redirect");
        Redirect::to("/").into_response()
    }
}

// ─────────────────────────────────────────────────────────────
//  Handlers
// ─────────────────────────────────────────────────────────────

#[instrument(skip(sessions))]
async fn serve_index(State(sessions): State<Sessions>, Caller(id): Caller) -> Redirect {
    match id.and_then(|id| sessions.status(id)) {
        Some(SessionStatus::Waiting) => Redirect::to("/waiting"),
        _ => Redirect::to("/home"),
    }
}

#[instrument(skip(sessions, form), fields(name = %form.name))]
async fn handle_login(
    State(sessions): State<Sessions>,
    Form(form): Form<LoginForm>,
) -> impl IntoResponse {
    let id = sessions.create_session(form.name);
    info!(session_id = %id, "Logged in");
    (
        [(header::SET_COOKIE, format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly"))],
        Redirect::to("/"),
    )
}

#[instrument(skip(sessions))]
async fn status(State(sessions): State<Sessions>, Caller(id): Caller) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: id.and_then(|id| sessions.status(id)),
    })
}

#[instrument(skip(sessions))]
async fn game_state(State(sessions): State<Sessions>, Caller(id): Caller) -> Response {
    with_caller(id, |id| sessions.game_state(id).map(Json))
}

#[instrument(skip(sessions))]
async fn game_summary(State(sessions): State<Sessions>, Caller(id): Caller) -> Response {
    with_caller(id, |id| sessions.game_summary(id).map(Json))
}

#[instrument(skip(sessions))]
async fn submit_move(
    State(sessions): State<Sessions>,
    Caller(id): Caller,
    Json(req): Json<MoveRequest>,
) -> Response {
    with_caller(id, |id| sessions.submit_move(id, req.row, req.col).map(Json))
}

#[instrument(skip(sessions))]
async fn rematch(State(sessions): State<Sessions>, Caller(id): Caller) -> Response {
    with_caller(id, |id| sessions.reset_game(id).map(|()| StatusCode::NO_CONTENT))
}

fn with_caller<T: IntoResponse>(
    id: Option<SessionId>,
    f: impl FnOnce(SessionId) -> Result<T, SessionError>,
) -> Response {
    let Some(id) = id else {
        return Redirect::to("/login").into_response();
    };
    match f(id) {
        Ok(body) => body.into_response(),
        Err(e) => e.into_response(),
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let code = match &self {
            SessionError::UnknownSession(_) => StatusCode::UNAUTHORIZED,
            SessionError::NotPlaying(_)
            | SessionError::NotYourTurn(_)
            | SessionError::GameInProgress(_) => StatusCode::CONFLICT,
            SessionError::IllegalMove { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            SessionError::NotSeated(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(error = %self, status = %code, "Request failed");
        (code, self.to_string()).into_response()
    }
}
