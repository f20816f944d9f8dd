//! Core domain types for the memory game.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A position on the board, zero-based and row-major.
///
/// Serialized as a `[row, col]` pair so it matches the wire format
/// clients already use for `flipped` and `hidden` positions.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_new::new,
    derive_more::Display,
)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Coord> for (usize, usize) {
    fn from(coord: Coord) -> Self {
        (coord.row, coord.col)
    }
}

/// The face of a card.
///
/// Values are opaque tokens: the game only ever compares them for equality.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct CardValue(String);

impl CardValue {
    /// Returns the value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardValue {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lifecycle of a single card.
///
/// `FaceDown -> Pending -> Matched` (terminal), or back to `FaceDown`
/// when a mismatched pair is resolved.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CellState {
    /// Hidden.
    FaceDown,
    /// Revealed during the current turn, outcome not settled.
    Pending,
    /// Part of a matched pair; stays face up for the rest of the game.
    Matched,
}

impl CellState {
    /// Returns true for every state except `FaceDown`.
    pub fn is_revealed(self) -> bool {
        !matches!(self, CellState::FaceDown)
    }
}

/// One card on the board.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Cell {
    /// The card's face. Never changes after the board is built.
    value: CardValue,
    /// Current lifecycle state.
    #[getter(copy)]
    state: CellState,
}

impl Cell {
    /// Creates a face-down card.
    pub(crate) fn face_down(value: CardValue) -> Self {
        Self {
            value,
            state: CellState::FaceDown,
        }
    }

    /// Returns true if the card is face up, pending or matched.
    pub fn revealed(&self) -> bool {
        self.state.is_revealed()
    }

    /// Returns true if the card belongs to a matched pair.
    pub fn is_matched(&self) -> bool {
        self.state == CellState::Matched
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

/// Picks made in the current turn that have not been settled yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingPicks {
    /// Ready for the first pick of a pair.
    #[default]
    Empty,
    /// One card revealed.
    One(Coord),
    /// Two mismatched cards revealed, waiting for resolve.
    Two(Coord, Coord),
}

impl PendingPicks {
    /// Number of pending positions (0, 1 or 2).
    pub fn len(&self) -> usize {
        match self {
            PendingPicks::Empty => 0,
            PendingPicks::One(_) => 1,
            PendingPicks::Two(_, _) => 2,
        }
    }

    /// Returns true when nothing is pending.
    pub fn is_empty(&self) -> bool {
        matches!(self, PendingPicks::Empty)
    }

    /// Pending positions in pick order.
    pub fn positions(&self) -> Vec<Coord> {
        match *self {
            PendingPicks::Empty => Vec::new(),
            PendingPicks::One(a) => vec![a],
            PendingPicks::Two(a, b) => vec![a, b],
        }
    }

    /// Returns true if the position is pending.
    pub fn contains(&self, coord: Coord) -> bool {
        match *self {
            PendingPicks::Empty => false,
            PendingPicks::One(a) => a == coord,
            PendingPicks::Two(a, b) => a == coord || b == coord,
        }
    }
}
