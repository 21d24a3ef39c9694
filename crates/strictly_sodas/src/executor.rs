//! The move executor: the only code that writes to a slot board.

use crate::action::{Move, MoveOutcome, MoveRejection, MoveSource, MoveTarget};
use crate::board::Slot;
use crate::contracts::{Contract, MoveContract};
use crate::round::Round;
use tracing::{debug, instrument};

/// Applies a move to a round.
///
/// Preconditions are checked always; a failing precondition leaves the board
/// untouched and reports [`MoveOutcome::Ignored`]. Postconditions are checked
/// in debug builds and roll the board back if they fail.
#[instrument(skip(round))]
pub(crate) fn execute(round: &mut Round, mv: Move) -> MoveOutcome {
    if let Err(rejection) = MoveContract::pre(round, &mv) {
        debug!(reason = %rejection, "Move ignored");
        return MoveOutcome::Ignored(rejection);
    }

    #[cfg(debug_assertions)]
    let before = round.clone();

    let outcome = match (mv.source, mv.target) {
        (MoveSource::Inventory(brand), MoveTarget::Slot(index)) => {
            let displaced = round.board.get(index).and_then(Slot::brand);
            round.board.set(index, Slot::Filled(brand));
            MoveOutcome::Placed { index, displaced }
        }
        (MoveSource::Slot { index: from, .. }, MoveTarget::Slot(to)) => {
            round.board.swap(from, to);
            MoveOutcome::Swapped { from, to }
        }
        (MoveSource::Slot { index, brand }, MoveTarget::Inventory) => {
            round.board.set(index, Slot::Empty);
            MoveOutcome::Removed { index, brand }
        }
        (MoveSource::Inventory(_), MoveTarget::Inventory) => {
            MoveOutcome::Ignored(MoveRejection::InventoryToInventory)
        }
    };

    #[cfg(debug_assertions)]
    {
        if let Err(rejection) = MoveContract::post(&before, round) {
            tracing::warn!(reason = %rejection, "Postcondition failed, rolling back");
            *round = before;
            return MoveOutcome::Ignored(rejection);
        }
    }

    debug!(board = %round.board.display(), "Move applied");
    outcome
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
            vec![Brand::Lime, Brand::Cola, Brand::Grape, Brand::Water, Brand::Energy],
        )
        .unwrap();
        Round::with_target(catalog.active(5), target)
    }

    #[test]
    fn test_place_into_empty_slot() {
        let mut round = round();
        let outcome = execute(&mut round, Move::place(Brand::Cola, 2));
        assert_eq!(
            outcome,
            MoveOutcome::Placed {
                index: 2,
                displaced: None
            }
        );
        assert_eq!(round.board.get(2), Some(Slot::Filled(Brand::Cola)));
    }

    #[test]
    fn test_place_onto_occupied_slot_returns_occupant() {
        let mut round = round();
        execute(&mut round, Move::place(Brand::Grape, 1));
        let outcome = execute(&mut round, Move::place(Brand::Water, 1));

        assert_eq!(
            outcome,
            MoveOutcome::Placed {
                index: 1,
                displaced: Some(Brand::Grape)
            }
        );
        assert_eq!(round.board.get(1), Some(Slot::Filled(Brand::Water)));
        assert!(round.inventory().contains(&Brand::Grape));
        assert!(!round.inventory().contains(&Brand::Water));
    }

    #[test]
    fn test_slot_to_slot_swaps() {
        let mut round = round();
        execute(&mut round, Move::place(Brand::Cola, 0));
        execute(&mut round, Move::place(Brand::Lime, 3));
        let outcome = execute(&mut round, Move::shift(0, Brand::Cola, 3));

        assert_eq!(outcome, MoveOutcome::Swapped { from: 0, to: 3 });
        assert_eq!(round.board.get(0), Some(Slot::Filled(Brand::Lime)));
        assert_eq!(round.board.get(3), Some(Slot::Filled(Brand::Cola)));
    }

    #[test]
    fn test_slot_to_empty_slot_moves() {
        let mut round = round();
        execute(&mut round, Move::place(Brand::Energy, 4));
        execute(&mut round, Move::shift(4, Brand::Energy, 1));

        assert_eq!(round.board.get(4), Some(Slot::Empty));
        assert_eq!(round.board.get(1), Some(Slot::Filled(Brand::Energy)));
    }

    #[test]
    fn test_remove_returns_to_inventory() {
        let mut round = round();
        execute(&mut round, Move::place(Brand::Lime, 0));
        let outcome = execute(&mut round, Move::remove(0, Brand::Lime));

        assert_eq!(
            outcome,
            MoveOutcome::Removed {
                index: 0,
                brand: Brand::Lime
            }
        );
        assert_eq!(round.inventory().len(), 5);
    }

    #[test]
    fn test_ignored_moves_leave_board_untouched() {
        let mut round = round();
        execute(&mut round, Move::place(Brand::Cola, 0));
        let before = round.board.clone();

        let ignored = [
            Move::place(Brand::Cola, 1),
            Move::place(Brand::Lime, 9),
            Move::shift(0, Brand::Cola, 0),
            Move::remove(2, Brand::Grape),
            Move::new(MoveSource::Inventory(Brand::Lime), MoveTarget::Inventory),
        ];
        for mv in ignored {
            assert!(!execute(&mut round, mv).is_applied(), "{mv}");
        }
        assert_eq!(round.board, before);
    }
}
