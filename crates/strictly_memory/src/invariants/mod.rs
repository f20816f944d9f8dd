//! First-class invariants for the board session.
//!
//! Invariants are logical properties that must hold after every operation.
//! They are testable independently and are checked by the session's
//! postconditions in debug builds.

mod matched_pairs;
mod pending_bound;
mod shape;

pub use matched_pairs::MatchedPairsInvariant;
pub use pending_bound::PendingBoundInvariant;
pub use shape::ShapeInvariant;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant or postcondition.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{description}")]
pub struct InvariantViolation {
    /// Description of what was violated.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// Folds several violations into one, descriptions joined by `; `.
    pub fn combine(violations: &[InvariantViolation]) -> Self {
        Self::new(
            violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples so invariants compose without allocation
/// on the happy path.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2) as InvariantSet<S>>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(v) => v,
        };
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Every session invariant as a composable set.
pub type SessionInvariants = (ShapeInvariant, PendingBoundInvariant, MatchedPairsInvariant);
