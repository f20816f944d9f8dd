//! Contract-based validation for the pick/resolve protocol.
//!
//! Contracts formalize Hoare-style reasoning: `{P} action {Q}`.
//! Preconditions are always checked and produce the caller-facing
//! [`SessionError`]. Postconditions are checked in debug builds only.

use crate::invariants::{InvariantSet, InvariantViolation, SessionInvariants};
use crate::{CellState, Pick, PendingPicks, Resolve, Session, SessionError};
use tracing::instrument;

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), SessionError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), InvariantViolation>;
}

// ─────────────────────────────────────────────────────────────
//  Pick Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: no mismatched pair is waiting for resolve.
///
/// Checked first, so a third pick is refused whatever position it names.
pub struct NoPairAwaiting;

impl NoPairAwaiting {
    /// Fails with `AwaitingResolve` while two picks are pending.
    pub fn check(session: &Session) -> Result<(), SessionError> {
        match session.pending() {
            PendingPicks::Two(_, _) => Err(SessionError::AwaitingResolve),
            _ => Ok(()),
        }
    }
}

/// Precondition: the pick names a position on the board.
pub struct InBounds;

impl InBounds {
    /// Fails with `OutOfBounds` for negative or too-large positions.
    pub fn check(pick: &Pick, session: &Session) -> Result<(), SessionError> {
        session.board.locate(pick.row, pick.col).map(|_| ())
    }
}

/// Precondition: the target card is face down.
pub struct FaceDownTarget;

impl FaceDownTarget {
    /// Fails with `CellAlreadyRevealed` for pending or matched cards.
    pub fn check(pick: &Pick, session: &Session) -> Result<(), SessionError> {
        let (coord, cell) = session.board.lookup(pick.row, pick.col)?;
        if cell.revealed() {
            Err(SessionError::CellAlreadyRevealed { coord })
        } else {
            Ok(())
        }
    }
}

/// Composite precondition for a pick, in protocol order.
pub struct LegalPick;

impl LegalPick {
    /// Validates all pick preconditions.
    #[instrument(skip(session))]
    pub fn check(pick: &Pick, session: &Session) -> Result<(), SessionError> {
        NoPairAwaiting::check(session)?;
        InBounds::check(pick, session)?;
        FaceDownTarget::check(pick, session)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Contracts
// ─────────────────────────────────────────────────────────────

/// Contract for picks.
///
/// Postconditions:
/// - exactly one more card is face up
/// - no matched card was lost
/// - all session invariants hold
pub struct PickContract;

impl Contract<Session, Pick> for PickContract {
    fn pre(session: &Session, pick: &Pick) -> Result<(), SessionError> {
        LegalPick::check(pick, session)
    }

    fn post(before: &Session, after: &Session) -> Result<(), InvariantViolation> {
        if after.board.revealed_count() != before.board.revealed_count() + 1 {
            return Err(InvariantViolation::new(
                "Pick must turn over exactly one card",
            ));
        }
        if after.board.matched_count() < before.board.matched_count() {
            return Err(InvariantViolation::new("Pick must not unmatch cards"));
        }
        check_invariants(after)
    }
}

/// Contract for resolve.
///
/// Preconditions:
/// - exactly two picks are pending and both cards are still `Pending`
///
/// Postconditions:
/// - exactly two cards went face down
/// - matched cards are untouched
/// - nothing is pending
pub struct ResolveContract;

impl Contract<Session, Resolve> for ResolveContract {
    fn pre(session: &Session, _resolve: &Resolve) -> Result<(), SessionError> {
        let PendingPicks::Two(a, b) = session.pending() else {
            return Err(SessionError::NothingToResolve);
        };
        let still_pending = [a, b].iter().all(|coord| {
            session
                .board
                .get(*coord)
                .is_some_and(|cell| cell.state() == CellState::Pending)
        });
        if still_pending {
            Ok(())
        } else {
            Err(SessionError::NothingToResolve)
        }
    }

    fn post(before: &Session, after: &Session) -> Result<(), InvariantViolation> {
        if after.board.revealed_count() + 2 != before.board.revealed_count() {
            return Err(InvariantViolation::new(
                "Resolve must turn exactly two cards face down",
            ));
        }
        if after.board.matched_count() != before.board.matched_count() {
            return Err(InvariantViolation::new("Resolve must not touch matched cards"));
        }
        if !after.pending().is_empty() {
            return Err(InvariantViolation::new("Resolve must clear pending picks"));
        }
        check_invariants(after)
    }
}

fn check_invariants(session: &Session) -> Result<(), InvariantViolation> {
    SessionInvariants::check_all(session).map_err(|violations| {
        InvariantViolation::new(format!(
            "Postcondition failed: {}",
            InvariantViolation::combine(&violations)
        ))
    })
}

/// Logs a failed postcondition and trips a debug assertion.
#[cfg(debug_assertions)]
pub(crate) fn assert_postcondition(result: Result<(), InvariantViolation>) {
    if let Err(violation) = &result {
        tracing::error!(%violation, "Session postcondition violated");
    }
    debug_assert!(result.is_ok(), "Session postcondition violated: {result:?}");
}
