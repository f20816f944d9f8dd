//! Requests and results of the pick/resolve protocol.
//!
//! Picks are domain events: they carry the caller's intent and can be
//! checked against a contract before the session applies them.

use crate::{CardValue, Coord};
use derive_getters::Getters;

/// A request to turn over the card at `(row, col)`.
///
/// Coordinates are signed so that requests from outside the process can
/// name any position, including negative ones, and be rejected as out of
/// bounds rather than failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_new::new, derive_more::Display)]
#[display("pick ({row}, {col})")]
pub struct Pick {
    /// Requested row.
    pub row: i64,
    /// Requested column.
    pub col: i64,
}

impl From<Coord> for Pick {
    fn from(coord: Coord) -> Self {
        Self {
            row: i64::try_from(coord.row).unwrap_or(i64::MAX),
            col: i64::try_from(coord.col).unwrap_or(i64::MAX),
        }
    }
}

/// A request to flip a mismatched pair back face down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Resolve;

/// What a pick settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// First card of a pair; no comparison yet.
    First,
    /// The two cards are equal and are now permanently face up.
    Match {
        /// Both positions of the pair, in pick order.
        pair: [Coord; 2],
    },
    /// The two cards differ and stay face up until resolved.
    Mismatch {
        /// Positions that resolve will turn back over, in pick order.
        pending_hide: [Coord; 2],
    },
}

/// Result of a successful pick.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PickResult {
    /// Position that was turned over.
    #[getter(copy)]
    flipped: Coord,
    /// Face of the turned card.
    value: CardValue,
    /// Whether this pick completed a pair, and how.
    #[getter(copy)]
    outcome: PickOutcome,
}

impl PickResult {
    pub(crate) fn new(flipped: Coord, value: CardValue, outcome: PickOutcome) -> Self {
        Self {
            flipped,
            value,
            outcome,
        }
    }

    /// `None` after the first pick of a pair, otherwise whether the pair matched.
    pub fn matched(&self) -> Option<bool> {
        match self.outcome {
            PickOutcome::First => None,
            PickOutcome::Match { .. } => Some(true),
            PickOutcome::Mismatch { .. } => Some(false),
        }
    }
}

/// Result of a successful resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct ResolveResult {
    /// Positions turned back face down, in pick order.
    hidden: [Coord; 2],
}

impl ResolveResult {
    pub(crate) fn new(hidden: [Coord; 2]) -> Self {
        Self { hidden }
    }
}
