//! The board session: one board, one pick cursor, one protocol.

use crate::contracts::{Contract, PickContract, ResolveContract};
use crate::{
    Board, BoardView, CardValue, Cell, CellState, Coord, PendingPicks, Pick, PickOutcome,
    PickResult, Resolve, ResolveResult, SessionError,
};
use tracing::{debug, info, instrument, warn};

/// A memory game in progress.
///
/// The session is the only owner of its board and the sole source of truth
/// for which cards are face up. Every operation is all-or-nothing: when one
/// fails, the session is left exactly as it was.
///
/// Pick cursor: `Empty --pick--> One --pick--> Empty` on a match, or
/// `Two --resolve--> Empty` on a mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) board: Board,
    pub(crate) pending: PendingPicks,
}

impl Session {
    /// Starts a fresh game with every card face down.
    ///
    /// Values are placed row-major in the order given. Fails with
    /// [`SessionError::ShapeMismatch`] unless they fill the grid exactly.
    #[instrument(skip(values))]
    pub fn create<I>(rows: usize, cols: usize, values: I) -> Result<Self, SessionError>
    where
        I: IntoIterator,
        I::Item: Into<CardValue>,
    {
        let values: Vec<CardValue> = values.into_iter().map(Into::into).collect();
        let board = Board::new(rows, cols, values).inspect_err(|e| {
            warn!(error = %e, "Rejected board shape");
        })?;

        info!(rows, cols, "Created memory session");
        Ok(Self {
            board,
            pending: PendingPicks::Empty,
        })
    }

    /// Turns over the card at `(row, col)`.
    ///
    /// On the second pick of a pair the values are compared once: an equal
    /// pair is matched and the cursor clears immediately, a different pair
    /// stays face up until [`Session::resolve`].
    #[instrument(skip(self))]
    pub fn pick(&mut self, row: i64, col: i64) -> Result<PickResult, SessionError> {
        self.apply_pick(Pick::new(row, col))
    }

    /// Turns over the card at a board coordinate.
    pub fn pick_at(&mut self, coord: Coord) -> Result<PickResult, SessionError> {
        self.apply_pick(Pick::from(coord))
    }

    fn apply_pick(&mut self, action: Pick) -> Result<PickResult, SessionError> {
        PickContract::pre(self, &action).inspect_err(|e| {
            warn!(%action, error = %e, "Pick rejected");
        })?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let (coord, cell) = self.board.lookup(action.row, action.col)?;
        let value = cell.value().clone();

        // Decide the outcome before touching any state.
        let outcome = match self.pending {
            PendingPicks::Empty => PickOutcome::First,
            PendingPicks::One(first) => {
                let equal = self
                    .board
                    .get(first)
                    .is_some_and(|first_cell| *first_cell.value() == value);
                if equal {
                    PickOutcome::Match {
                        pair: [first, coord],
                    }
                } else {
                    PickOutcome::Mismatch {
                        pending_hide: [first, coord],
                    }
                }
            }
            PendingPicks::Two(_, _) => return Err(SessionError::AwaitingResolve),
        };

        match outcome {
            PickOutcome::First => {
                self.board.set_state(coord, CellState::Pending);
                self.pending = PendingPicks::One(coord);
                debug!(%coord, %value, "First card of pair turned");
            }
            PickOutcome::Match { pair: [a, b] } => {
                self.board.set_state(a, CellState::Matched);
                self.board.set_state(b, CellState::Matched);
                self.pending = PendingPicks::Empty;
                info!(first = %a, second = %b, %value, "Pair matched");
            }
            PickOutcome::Mismatch {
                pending_hide: [a, b],
            } => {
                self.board.set_state(b, CellState::Pending);
                self.pending = PendingPicks::Two(a, b);
                info!(first = %a, second = %b, "Pair mismatched, awaiting resolve");
            }
        }

        #[cfg(debug_assertions)]
        crate::contracts::assert_postcondition(PickContract::post(&before, self));

        Ok(PickResult::new(coord, value, outcome))
    }

    /// Turns a mismatched pair back face down and clears the cursor.
    ///
    /// Fails with [`SessionError::NothingToResolve`] unless a mismatched
    /// pair is pending, so a stray call can never hide matched cards.
    #[instrument(skip(self))]
    pub fn resolve(&mut self) -> Result<ResolveResult, SessionError> {
        ResolveContract::pre(self, &Resolve).inspect_err(|e| {
            debug!(error = %e, "Resolve rejected");
        })?;

        let PendingPicks::Two(a, b) = self.pending else {
            return Err(SessionError::NothingToResolve);
        };

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board.set_state(a, CellState::FaceDown);
        self.board.set_state(b, CellState::FaceDown);
        self.pending = PendingPicks::Empty;
        info!(first = %a, second = %b, "Resolved mismatched pair");

        #[cfg(debug_assertions)]
        crate::contracts::assert_postcondition(ResolveContract::post(&before, self));

        Ok(ResolveResult::new([a, b]))
    }

    /// True once every card has been matched. Pending cards do not count.
    pub fn is_complete(&self) -> bool {
        self.board.cells().iter().all(Cell::is_matched)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    /// The card at a position, if it is on the board.
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.board.get(coord)
    }

    /// Positions picked this turn that are not settled yet.
    pub fn pending(&self) -> PendingPicks {
        self.pending
    }

    /// Number of pairs matched so far.
    pub fn matched_pairs(&self) -> usize {
        self.board.matched_count() / 2
    }

    /// A client-safe snapshot of the board.
    pub fn view(&self) -> BoardView {
        BoardView::from_board(&self.board)
    }

    /// Formats the board as a grid, `?` for face-down cards.
    pub fn display(&self) -> String {
        self.view().to_string()
    }
}
