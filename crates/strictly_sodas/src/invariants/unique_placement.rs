//! Unique placement: a brand occupies at most one slot.

use super::Invariant;
use crate::round::Round;

/// Invariant: no brand appears in two slots at once.
///
/// Together with the derived inventory this means every active brand is in
/// exactly one place.
pub struct UniquePlacementInvariant;

impl Invariant<Round> for UniquePlacementInvariant {
    fn holds(round: &Round) -> bool {
        let placed: Vec<_> = round.board().placed().collect();
        placed
            .iter()
            .enumerate()
            .all(|(i, brand)| !placed[..i].contains(brand))
    }

    fn description() -> &'static str {
        "Each brand occupies at most one slot"
    }
}
