//! Where a game is played: in-process or against a server.

use crate::api::{NewGameRequest, PickRequest, PickResponse, ResolveResponse};
use crate::{RestGameClient, SessionManager};
use anyhow::Result;
use strictly_memory::{BoardSpec, BoardView, Coord};

/// The three logical requests plus a board read, independent of transport.
#[async_trait::async_trait]
pub trait GameBackend: Send + Sync {
    /// Starts a new game with the given layout.
    async fn new_game(&self, spec: &BoardSpec) -> Result<()>;

    /// Turns over one card.
    async fn pick(&self, coord: Coord) -> Result<PickResponse>;

    /// Flips a mismatched pair back face down.
    async fn resolve(&self) -> Result<ResolveResponse>;

    /// Current board snapshot.
    async fn board(&self) -> Result<BoardView>;
}

/// Plays directly against a [`SessionManager`] in this process.
#[derive(Debug, Clone, Default)]
pub struct LocalBackend {
    sessions: SessionManager,
}

impl LocalBackend {
    /// Wraps an existing session manager.
    pub fn new(sessions: SessionManager) -> Self {
        Self { sessions }
    }

    /// The shared session manager.
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}

#[async_trait::async_trait]
impl GameBackend for LocalBackend {
    async fn new_game(&self, spec: &BoardSpec) -> Result<()> {
        self.sessions
            .new_game(spec.rows(), spec.cols(), spec.values().iter().cloned())?;
        Ok(())
    }

    async fn pick(&self, coord: Coord) -> Result<PickResponse> {
        let request = PickRequest::from(coord);
        Ok(self.sessions.pick(request.row, request.col)?.into())
    }

    async fn resolve(&self) -> Result<ResolveResponse> {
        Ok(self.sessions.resolve()?.into())
    }

    async fn board(&self) -> Result<BoardView> {
        Ok(self.sessions.view()?)
    }
}

#[async_trait::async_trait]
impl GameBackend for RestGameClient {
    async fn new_game(&self, spec: &BoardSpec) -> Result<()> {
        RestGameClient::new_game(self, &NewGameRequest::from(spec.clone())).await
    }

    async fn pick(&self, coord: Coord) -> Result<PickResponse> {
        RestGameClient::pick(self, coord.into()).await
    }

    async fn resolve(&self) -> Result<ResolveResponse> {
        RestGameClient::resolve(self).await
    }

    async fn board(&self) -> Result<BoardView> {
        RestGameClient::board(self).await
    }
}
