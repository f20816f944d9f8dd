//! Client-safe snapshots of the board.
//!
//! A view never carries the value of a face-down card, so it can be handed
//! to any client without leaking the layout.

use crate::{Board, CardValue, CellState, Coord};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a client may see of one card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct CellView {
    /// Lifecycle state.
    #[getter(copy)]
    state: CellState,
    /// The face, present only while the card is face up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<CardValue>,
}

impl CellView {
    /// Returns true if the card is face down.
    pub fn is_face_down(&self) -> bool {
        self.state == CellState::FaceDown
    }
}

/// Snapshot of the whole board, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct BoardView {
    /// Number of rows.
    #[getter(copy)]
    rows: usize,
    /// Number of columns.
    #[getter(copy)]
    cols: usize,
    /// Cards in row-major order.
    cells: Vec<CellView>,
    /// True once every card is matched.
    #[getter(copy)]
    complete: bool,
}

impl BoardView {
    /// Captures the current state of a board.
    pub fn from_board(board: &Board) -> Self {
        let cells = board
            .cells()
            .iter()
            .map(|cell| CellView {
                state: cell.state(),
                value: cell.revealed().then(|| cell.value().clone()),
            })
            .collect();

        Self {
            rows: board.rows(),
            cols: board.cols(),
            cells,
            complete: board.cells().iter().all(|c| c.is_matched()),
        }
    }

    /// The card at a position, if it is on the board.
    pub fn cell(&self, coord: Coord) -> Option<&CellView> {
        if coord.row < self.rows && coord.col < self.cols {
            self.cells.get(coord.row * self.cols + coord.col)
        } else {
            None
        }
    }

    /// Iterates over `(position, card)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &CellView)> + '_ {
        let cols = self.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::new(i / cols, i % cols), cell))
    }

    /// Positions of every face-down card.
    pub fn face_down(&self) -> Vec<Coord> {
        self.iter()
            .filter(|(_, cell)| cell.is_face_down())
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Renders the line-oriented text form.
    ///
    /// The first line is `ROWSxCOLS`; then one line per card, row-major:
    /// `down`, `up VALUE` for a pending card, or `matched VALUE`.
    pub fn look(&self) -> String {
        let mut out = format!("{}x{}\n", self.rows, self.cols);
        for cell in &self.cells {
            let line = match (cell.state, &cell.value) {
                (CellState::Pending, Some(value)) => format!("up {value}"),
                (CellState::Matched, Some(value)) => format!("matched {value}"),
                _ => "down".to_string(),
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cells
            .iter()
            .filter_map(|c| c.value.as_ref())
            .map(|v| v.as_str().chars().count())
            .max()
            .unwrap_or(1)
            .max(1);

        for (r, row) in self.cells.chunks(self.cols.max(1)).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let symbols: Vec<String> = row
                .iter()
                .map(|cell| {
                    let symbol = cell.value.as_ref().map_or("?", |v| v.as_str());
                    format!("{symbol:^width$}")
                })
                .collect();
            write!(f, "{}", symbols.join("|"))?;
        }
        Ok(())
    }
}
