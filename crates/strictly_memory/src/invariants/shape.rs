//! Shape invariant: the grid holds exactly `rows * cols` cards.

use super::Invariant;
use crate::Session;

/// Invariant: the card count matches the board shape.
pub struct ShapeInvariant;

impl Invariant<Session> for ShapeInvariant {
    fn holds(session: &Session) -> bool {
        let board = &session.board;
        board.rows() > 0
            && board.cols() > 0
            && board.cells().len() == board.rows() * board.cols()
    }

    fn description() -> &'static str {
        "Board holds exactly rows * cols cards"
    }
}
