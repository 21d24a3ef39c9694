//! Active subset: the board only ever holds brands that are in play.

use super::Invariant;
use crate::round::Round;

/// Invariant: board length equals the difficulty and every placed brand is
/// one of the active brands.
pub struct ActiveSubsetInvariant;

impl Invariant<Round> for ActiveSubsetInvariant {
    fn holds(round: &Round) -> bool {
        round.board().len() == round.size()
            && round.board().placed().all(|brand| round.active().contains(&brand))
    }

    fn description() -> &'static str {
        "Board matches the difficulty and holds only active brands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Slot;
    use crate::catalog::{Brand, Catalog};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fresh_round_holds() {
        let round = Round::deal(&Catalog::standard(), 6, &mut StdRng::seed_from_u64(9));
        assert!(ActiveSubsetInvariant::holds(&round));
    }

    #[test]
    fn test_foreign_brand_violates() {
        let mut round = Round::deal(&Catalog::standard(), 5, &mut StdRng::seed_from_u64(9));
        // Cream is the tenth brand, outside a size-5 game.
        round.board.set(4, Slot::Filled(Brand::Cream));
        assert!(!ActiveSubsetInvariant::holds(&round));
    }
}
