//! Transport-level errors and their HTTP rendering.

use crate::api::ErrorResponse;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use strictly_memory::SessionError;
use tracing::warn;

/// Why a request against the server failed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum ServerError {
    /// No game has been created yet.
    #[display("game not created")]
    NoActiveGame,

    /// The request body could not be decoded.
    #[display("invalid request: {message}")]
    InvalidRequest {
        /// Decoder message.
        message: String,
    },

    /// The session rejected the operation.
    #[display("{_0}")]
    #[from]
    Session(SessionError),
}

impl ServerError {
    /// Stable snake_case name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoActiveGame => "no_active_game",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Session(e) => e.kind(),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(e) => Some(e),
            _ => None,
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        warn!(kind = self.kind(), error = %self, "Request rejected");
        let body = ErrorResponse::new(self.to_string(), self.kind());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
