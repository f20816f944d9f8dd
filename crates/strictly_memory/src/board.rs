//! The card grid.

use crate::{CardValue, Cell, CellState, Coord, SessionError};
use tracing::instrument;

/// A `rows x cols` grid of cards, stored row-major.
///
/// Values are laid out in the order given; the board never shuffles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Builds a face-down board from a shape and its values.
    ///
    /// Fails with [`SessionError::ShapeMismatch`] when the values do not
    /// fill the grid exactly, including the degenerate zero-area shapes.
    #[instrument(skip(values))]
    pub fn new(rows: usize, cols: usize, values: Vec<CardValue>) -> Result<Self, SessionError> {
        let mismatch = |expected| SessionError::ShapeMismatch {
            rows,
            cols,
            expected,
            actual: values.len(),
        };

        let expected = rows.checked_mul(cols).ok_or_else(|| mismatch(usize::MAX))?;
        if expected == 0 || values.len() != expected {
            return Err(mismatch(expected));
        }

        Ok(Self {
            rows,
            cols,
            cells: values.into_iter().map(Cell::face_down).collect(),
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Resolves a signed request position to a coordinate and its card.
    pub fn lookup(&self, row: i64, col: i64) -> Result<(Coord, &Cell), SessionError> {
        let coord = self.locate(row, col)?;
        Ok((coord, &self.cells[coord.row * self.cols + coord.col]))
    }

    /// Converts a signed request position into a board coordinate.
    pub fn locate(&self, row: i64, col: i64) -> Result<Coord, SessionError> {
        let out_of_bounds = || SessionError::OutOfBounds {
            row,
            col,
            rows: self.rows,
            cols: self.cols,
        };

        let r = usize::try_from(row).map_err(|_| out_of_bounds())?;
        let c = usize::try_from(col).map_err(|_| out_of_bounds())?;
        let coord = Coord::new(r, c);
        if self.contains(coord) {
            Ok(coord)
        } else {
            Err(out_of_bounds())
        }
    }

    /// Returns true if the position lies on the board.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Gets the card at a position.
    pub fn get(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).map(|i| &self.cells[i])
    }

    /// Moves a card to a new state. Positions off the board are ignored.
    pub(crate) fn set_state(&mut self, coord: Coord, state: CellState) {
        if let Some(i) = self.index(coord) {
            self.cells[i].set_state(state);
        }
    }

    /// Number of cards currently face up, pending or matched.
    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.revealed()).count()
    }

    /// Number of cards in matched pairs.
    pub fn matched_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_matched()).count()
    }

    /// All cards in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterates over `(position, card)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::new(i / cols, i % cols), cell))
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.row * self.cols + coord.col)
    }
}
