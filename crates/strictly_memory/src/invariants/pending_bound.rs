//! Pending bound invariant: the pick cursor and the Pending cards agree.

use super::Invariant;
use crate::{CellState, PendingPicks, Session};

/// Invariant: at most two distinct, on-board positions are pending, and
/// exactly those cards are in the `Pending` state.
///
/// Two pending positions always hold different values; an equal pair is
/// matched on the spot and never waits for resolve.
pub struct PendingBoundInvariant;

impl Invariant<Session> for PendingBoundInvariant {
    fn holds(session: &Session) -> bool {
        let board = &session.board;
        let pending = session.pending;

        if pending.positions().iter().any(|c| !board.contains(*c)) {
            return false;
        }

        if let PendingPicks::Two(a, b) = pending {
            if a == b {
                return false;
            }
            let values_differ = match (board.get(a), board.get(b)) {
                (Some(x), Some(y)) => x.value() != y.value(),
                _ => false,
            };
            if !values_differ {
                return false;
            }
        }

        board.iter().all(|(coord, cell)| {
            (cell.state() == CellState::Pending) == pending.contains(coord)
        })
    }

    fn description() -> &'static str {
        "Pending picks are the only Pending cards (at most two, never an equal pair)"
    }
}
