//! Type-safe HTTP client for the REST API.

use crate::api::{
    ErrorResponse, NewGameRequest, PickRequest, PickResponse, ResolveResponse, StatusResponse,
};
use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use strictly_memory::BoardView;
use tracing::{debug, info, instrument};

/// Client for a running memory server.
#[derive(Debug, Clone)]
pub struct RestGameClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestGameClient {
    /// Creates a client for the server at `base_url`, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Server root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a new game on the server.
    #[instrument(skip(self, request), fields(rows = request.rows, cols = request.cols))]
    pub async fn new_game(&self, request: &NewGameRequest) -> Result<()> {
        info!("Creating game via REST");
        let _: StatusResponse = self.post("new", Some(request)).await?;
        Ok(())
    }

    /// Turns over one card.
    #[instrument(skip(self))]
    pub async fn pick(&self, request: PickRequest) -> Result<PickResponse> {
        self.post("pick", Some(&request)).await
    }

    /// Flips a mismatched pair back face down.
    #[instrument(skip(self))]
    pub async fn resolve(&self) -> Result<ResolveResponse> {
        self.post::<(), _>("resolve", None).await
    }

    /// Gets the current board.
    #[instrument(skip(self))]
    pub async fn board(&self) -> Result<BoardView> {
        let response = self
            .client
            .get(self.url("board"))
            .send()
            .await
            .context("Failed to reach server")?;
        Self::decode("board", response).await
    }

    /// Checks that the server is up.
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<()> {
        let response = self
            .client
            .get(self.url("health"))
            .send()
            .await
            .context("Failed to reach server")?;
        let _: StatusResponse = Self::decode("health", response).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B, T>(&self, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.context("Failed to reach server")?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read /{} response", path))?;
        debug!(%status, body = %body, "Got response");

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<ErrorResponse>(&body) {
                anyhow::bail!("/{} failed: {} ({})", path, error.message(), error.kind());
            }
            anyhow::bail!("/{} failed: {} - {}", path, status, body);
        }

        serde_json::from_str(&body)
            .with_context(|| format!("Unexpected /{} response: {}", path, body))
    }
}
