//! REST transport: one route per logical request.

use crate::api::{NewGameRequest, PickRequest, PickResponse, ResolveResponse, StatusResponse};
use crate::{ServerConfig, ServerError, SessionManager};
use anyhow::{Context, Result};
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::routing::{get, post};
use axum::{Json, Router};
use strictly_memory::BoardView;
use tokio::net::TcpListener;
use tracing::{debug, info, instrument};

/// Builds the router over a shared session.
///
/// | Route | Body | Answer |
/// |---|---|---|
/// | `POST /new` | `{rows, cols, values}` | `{status}` |
/// | `POST /pick` | `{row, col}` | `{status, value, match, flipped, pending_hide?}` |
/// | `POST /resolve` | none | `{status, resolved, hidden}` |
/// | `GET /board` | none | board view |
/// | `GET /health` | none | `{status}` |
pub fn router(sessions: SessionManager) -> Router {
    Router::new()
        .route("/new", post(new_game))
        .route("/pick", post(pick))
        .route("/resolve", post(resolve))
        .route("/board", get(board))
        .route("/health", get(health))
        .with_state(sessions)
}

/// Binds the configured address and serves until the process ends.
#[instrument(skip(config), fields(address = %config.address()))]
pub async fn serve(config: &ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(config.address())
        .await
        .with_context(|| format!("Failed to bind {}", config.address()))?;
    serve_on(listener, SessionManager::new()).await
}

/// Serves on an already-bound listener.
pub async fn serve_on(listener: TcpListener, sessions: SessionManager) -> Result<()> {
    let local = listener.local_addr().context("Listener has no local address")?;
    info!(%local, "Memory server ready");
    axum::serve(listener, router(sessions))
        .await
        .context("Server stopped")
}

#[instrument(skip_all)]
async fn new_game(
    State(sessions): State<SessionManager>,
    body: Result<Json<NewGameRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, ServerError> {
    let Json(request) = body?;
    sessions.new_game(request.rows, request.cols, request.values)?;
    Ok(Json(StatusResponse::ok()))
}

#[instrument(skip_all)]
async fn pick(
    State(sessions): State<SessionManager>,
    body: Result<Json<PickRequest>, JsonRejection>,
) -> Result<Json<PickResponse>, ServerError> {
    let Json(request) = body?;
    let result = sessions.pick(request.row, request.col)?;
    Ok(Json(result.into()))
}

#[instrument(skip_all)]
async fn resolve(
    State(sessions): State<SessionManager>,
) -> Result<Json<ResolveResponse>, ServerError> {
    let result = sessions.resolve()?;
    Ok(Json(result.into()))
}

#[instrument(skip_all)]
async fn board(State(sessions): State<SessionManager>) -> Result<Json<BoardView>, ServerError> {
    sessions.view().map(Json)
}

async fn health() -> Json<StatusResponse> {
    debug!("Health check");
    Json(StatusResponse::ok())
}
