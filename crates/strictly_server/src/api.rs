//! JSON bodies of the REST API.
//!
//! The same types are used by the server to answer and by the client to
//! decode, so both sides agree on the wire format.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strictly_memory::{BoardSpec, CardValue, Coord, PickOutcome, PickResult, ResolveResult};

/// Outcome marker carried by every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The request succeeded.
    #[display("ok")]
    Ok,
    /// The request was rejected.
    #[display("error")]
    Error,
}

/// `POST /new` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct NewGameRequest {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Card values, row-major.
    pub values: Vec<CardValue>,
}

impl From<BoardSpec> for NewGameRequest {
    fn from(spec: BoardSpec) -> Self {
        let (rows, cols, values) = spec.into_parts();
        Self { rows, cols, values }
    }
}

/// `POST /pick` body.
///
/// Signed so negative positions reach the session and come back as
/// `out_of_bounds` instead of failing to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct PickRequest {
    /// Requested row.
    pub row: i64,
    /// Requested column.
    pub col: i64,
}

impl From<Coord> for PickRequest {
    fn from(coord: Coord) -> Self {
        Self {
            row: i64::try_from(coord.row).unwrap_or(i64::MAX),
            col: i64::try_from(coord.col).unwrap_or(i64::MAX),
        }
    }
}

/// Body of responses that carry nothing but a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `ok`.
    pub status: Status,
}

impl StatusResponse {
    /// A plain `{"status": "ok"}`.
    pub fn ok() -> Self {
        Self { status: Status::Ok }
    }
}

/// `POST /pick` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PickResponse {
    /// Always `ok`.
    #[getter(copy)]
    status: Status,
    /// Face of the turned card.
    value: CardValue,
    /// `null` on the first pick of a pair, then whether the pair matched.
    #[serde(rename = "match", default)]
    #[getter(copy)]
    matched: Option<bool>,
    /// Position that was turned.
    #[getter(copy)]
    flipped: Coord,
    /// Present on a mismatch: the positions resolve will hide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[getter(copy)]
    pending_hide: Option<[Coord; 2]>,
}

impl From<PickResult> for PickResponse {
    fn from(result: PickResult) -> Self {
        let pending_hide = match result.outcome() {
            PickOutcome::Mismatch { pending_hide } => Some(pending_hide),
            _ => None,
        };
        Self {
            status: Status::Ok,
            matched: result.matched(),
            flipped: result.flipped(),
            value: result.value().clone(),
            pending_hide,
        }
    }
}

/// `POST /resolve` answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ResolveResponse {
    /// Always `ok`.
    #[getter(copy)]
    status: Status,
    /// Always true on success.
    #[getter(copy)]
    resolved: bool,
    /// Positions turned back face down.
    hidden: [Coord; 2],
}

impl From<ResolveResult> for ResolveResponse {
    fn from(result: ResolveResult) -> Self {
        Self {
            status: Status::Ok,
            resolved: true,
            hidden: *result.hidden(),
        }
    }
}

/// Body of every 400 answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ErrorResponse {
    /// Always `error`.
    #[getter(copy)]
    status: Status,
    /// Human-readable reason.
    message: String,
    /// Stable snake_case error kind.
    kind: String,
}

impl ErrorResponse {
    /// Creates an error body.
    pub fn new(message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            message: message.into(),
            kind: kind.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_memory::Session;

    #[test]
    fn test_first_pick_serializes_null_match() {
        let mut session = Session::create(1, 2, ["A", "B"]).unwrap();
        let response = PickResponse::from(session.pick(0, 1).unwrap());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "ok", "value": "B", "match": null, "flipped": [0, 1]})
        );
    }

    #[test]
    fn test_mismatch_carries_pending_hide() {
        let mut session = Session::create(1, 2, ["A", "B"]).unwrap();
        session.pick(0, 0).unwrap();
        let response = PickResponse::from(session.pick(0, 1).unwrap());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["match"], false);
        assert_eq!(json["pending_hide"], serde_json::json!([[0, 0], [0, 1]]));

        let decoded: PickResponse = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, response);
    }
}
