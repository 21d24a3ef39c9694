//! Target permutation: the hidden sequence covers the active set exactly.

use super::Invariant;
use crate::round::Round;

/// Invariant: the target has the active brands, each exactly once.
pub struct TargetPermutationInvariant;

impl Invariant<Round> for TargetPermutationInvariant {
    fn holds(round: &Round) -> bool {
        let target = round.target().brands();
        target.len() == round.size()
            && round
                .active()
                .iter()
                .all(|brand| target.iter().filter(|t| *t == brand).count() == 1)
    }

    fn description() -> &'static str {
        "Target is a permutation of the active brands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_dealt_targets_hold() {
        let catalog = Catalog::standard();
        let mut rng = StdRng::seed_from_u64(42);
        for size in 1..=catalog.len() {
            let round = Round::deal(&catalog, size, &mut rng);
            assert!(TargetPermutationInvariant::holds(&round), "size {size}");
        }
    }
}
