//! History consistency: every logged score is the true score of its snapshot.

use super::Invariant;
use crate::round::Round;
use crate::scorer;

/// Invariant: each history entry's match count equals the score of its
/// snapshot against the target, and ids run 1, 2, 3...
pub struct HistoryScoresInvariant;

impl Invariant<Round> for HistoryScoresInvariant {
    fn holds(round: &Round) -> bool {
        round.history().entries().iter().enumerate().all(|(i, entry)| {
            usize::try_from(*entry.id()).is_ok_and(|id| id == i + 1)
                && entry.snapshot().len() == round.size()
                && *entry.matches() == scorer::score(entry.snapshot(), round.target())
        })
    }

    fn description() -> &'static str {
        "History match counts agree with their snapshots"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;
    use crate::board::Guess;
    use crate::catalog::{Brand, Catalog};
    use crate::generator::TargetSequence;
    use chrono::Utc;

    fn round() -> Round {
        let catalog = Catalog::standard();
        let target = TargetSequence::from_order(&catalog, vec![Brand::Lime, Brand::Cola]).unwrap();
        Round::with_target(catalog.active(2), target)
    }

    #[test]
    fn test_confirmed_attempts_hold() {
        let mut round = round();
        round.apply(Move::place(Brand::Cola, 0));
        round.apply(Move::place(Brand::Lime, 1));
        round.confirm(Utc::now()).expect("board is complete");
        assert!(HistoryScoresInvariant::holds(&round));
    }

    #[test]
    fn test_forged_score_violates() {
        let mut round = round();
        round
            .history
            .record(Guess::new(vec![Brand::Cola, Brand::Lime]), 2, Utc::now());
        assert!(!HistoryScoresInvariant::holds(&round));
    }
}
