//! Matched pairs invariant: matched cards come two of a kind.

use super::Invariant;
use crate::{CardValue, Session};
use std::collections::HashMap;

/// Invariant: for every value, the number of matched cards is even.
pub struct MatchedPairsInvariant;

impl Invariant<Session> for MatchedPairsInvariant {
    fn holds(session: &Session) -> bool {
        let mut counts: HashMap<&CardValue, usize> = HashMap::new();
        for cell in session.board.cells().iter().filter(|c| c.is_matched()) {
            *counts.entry(cell.value()).or_default() += 1;
        }
        counts.values().all(|n| n % 2 == 0)
    }

    fn description() -> &'static str {
        "Matched cards come in equal-value pairs"
    }
}
