//! Error types for the board session.

use crate::Coord;

/// Why a session operation was rejected.
///
/// Every variant is a local validation failure. A rejected operation leaves
/// the session exactly as it was, and retrying the same call fails the same
/// way until the caller changes its request.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum SessionError {
    /// The number of values does not fill the requested grid.
    #[display("A {rows}x{cols} board needs {expected} values, got {actual}")]
    ShapeMismatch {
        /// Requested rows.
        rows: usize,
        /// Requested columns.
        cols: usize,
        /// Number of cells in the requested grid.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// The position lies outside the grid.
    #[display("Position ({row}, {col}) is outside the {rows}x{cols} board")]
    OutOfBounds {
        /// Requested row.
        row: i64,
        /// Requested column.
        col: i64,
        /// Board rows.
        rows: usize,
        /// Board columns.
        cols: usize,
    },

    /// The card is already face up, either pending or matched.
    #[display("Card at {coord} is already face up")]
    CellAlreadyRevealed {
        /// The rejected position.
        coord: Coord,
    },

    /// Two cards are already pending; resolve must run first.
    #[display("Two cards are already face up; resolve before picking again")]
    AwaitingResolve,

    /// There is no mismatched pair to flip back.
    #[display("No mismatched pair is waiting to be resolved")]
    NothingToResolve,
}

impl SessionError {
    /// Stable snake_case name of the error kind, e.g. `awaiting_resolve`.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

impl std::error::Error for SessionError {}
