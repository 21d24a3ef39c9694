//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(state, move)} move {Q(before, after)}`.

use crate::action::{Move, MoveRejection, MoveSource, MoveTarget};
use crate::board::Slot;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::round::Round;
use tracing::instrument;

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveRejection>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveRejection>;
}

/// Precondition: every slot index named by the move exists.
pub struct SlotsInRange;

impl SlotsInRange {
    /// Checks the precondition.
    #[instrument(skip(round))]
    pub fn check(mv: &Move, round: &Round) -> Result<(), MoveRejection> {
        let len = round.board().len();
        if let MoveSource::Slot { index, .. } = mv.source
            && index >= len
        {
            return Err(MoveRejection::SlotOutOfRange(index));
        }
        if let MoveTarget::Slot(index) = mv.target
            && index >= len
        {
            return Err(MoveRejection::SlotOutOfRange(index));
        }
        Ok(())
    }
}

/// Precondition: the dragged brand is in play and really is where the drag
/// says it came from.
pub struct SourceIsCurrent;

impl SourceIsCurrent {
    /// Checks the precondition.
    #[instrument(skip(round))]
    pub fn check(mv: &Move, round: &Round) -> Result<(), MoveRejection> {
        let brand = mv.source.brand();
        if !round.active().contains(&brand) {
            return Err(MoveRejection::InactiveBrand(brand));
        }
        match mv.source {
            MoveSource::Inventory(brand) if round.board().contains(brand) => {
                Err(MoveRejection::AlreadyPlaced(brand))
            }
            MoveSource::Slot { index, brand } if round.board().get(index) != Some(Slot::Filled(brand)) => {
                Err(MoveRejection::StaleSource { index, brand })
            }
            _ => Ok(()),
        }
    }
}

/// Precondition: the move goes somewhere.
pub struct MeaningfulDrop;

impl MeaningfulDrop {
    /// Checks the precondition.
    #[instrument]
    pub fn check(mv: &Move) -> Result<(), MoveRejection> {
        match (mv.source, mv.target) {
            (MoveSource::Inventory(_), MoveTarget::Inventory) => {
                Err(MoveRejection::InventoryToInventory)
            }
            (MoveSource::Slot { index, .. }, MoveTarget::Slot(to)) if index == to => {
                Err(MoveRejection::SameSlot(index))
            }
            _ => Ok(()),
        }
    }
}

/// Composite precondition for a legal move.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(skip(round))]
    pub fn check(mv: &Move, round: &Round) -> Result<(), MoveRejection> {
        MeaningfulDrop::check(mv)?;
        SlotsInRange::check(mv, round)?;
        SourceIsCurrent::check(mv, round)?;
        Ok(())
    }
}

/// Contract for moves.
///
/// Preconditions:
/// - Indices in range
/// - Source brand active and current
/// - Not a self-drop or inventory-to-inventory
///
/// Postconditions:
/// - No brand in two slots
/// - Only active brands on the board
/// - The set of brands in play is unchanged
pub struct MoveContract;

impl Contract<Round, Move> for MoveContract {
    fn pre(round: &Round, mv: &Move) -> Result<(), MoveRejection> {
        LegalMove::check(mv, round)
    }

    fn post(before: &Round, after: &Round) -> Result<(), MoveRejection> {
        BoardInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            MoveRejection::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        if before.active() != after.active() || before.target() != after.target() {
            return Err(MoveRejection::InvariantViolation(
                "Postcondition failed: move changed the round definition".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Brand, Catalog};
    use crate::generator::TargetSequence;

    fn round() -> Round {
        let catalog = Catalog::standard();
        let target = TargetSequence::from_order(
            &catalog,
            vec![Brand::Grape, Brand::Lime, Brand::Cola],
        )
        .unwrap();
        Round::with_target(catalog.active(3), target)
    }

    #[test]
    fn test_precondition_accepts_placement() {
        assert!(MoveContract::pre(&round(), &Move::place(Brand::Cola, 0)).is_ok());
    }

    #[test]
    fn test_precondition_out_of_range() {
        assert_eq!(
            MoveContract::pre(&round(), &Move::place(Brand::Cola, 3)),
            Err(MoveRejection::SlotOutOfRange(3))
        );
    }

    #[test]
    fn test_precondition_inactive_brand() {
        assert_eq!(
            MoveContract::pre(&round(), &Move::place(Brand::Water, 0)),
            Err(MoveRejection::InactiveBrand(Brand::Water))
        );
    }

    #[test]
    fn test_precondition_stale_inventory_pickup() {
        let mut round = round();
        round.board.set(1, Slot::Filled(Brand::Cola));
        assert_eq!(
            MoveContract::pre(&round, &Move::place(Brand::Cola, 0)),
            Err(MoveRejection::AlreadyPlaced(Brand::Cola))
        );
    }

    #[test]
    fn test_precondition_stale_slot_pickup() {
        let round = round();
        assert_eq!(
            MoveContract::pre(&round, &Move::remove(0, Brand::Lime)),
            Err(MoveRejection::StaleSource {
                index: 0,
                brand: Brand::Lime
            })
        );
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = round();
        let mut after = before.clone();
        after.board.set(0, Slot::Filled(Brand::Lime));
        after.board.set(2, Slot::Filled(Brand::Lime));
        assert!(matches!(
            MoveContract::post(&before, &after),
            Err(MoveRejection::InvariantViolation(_))
        ));
    }
}
