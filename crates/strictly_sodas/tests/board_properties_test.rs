//! Property-style tests for generation, moves and scoring.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strictly_sodas::{
    Brand, Catalog, Guess, InvariantSet, Move, MoveOutcome, MoveSource, MoveTarget, Round,
    RoundInvariants, Slot, TargetSequence, generate_sequence, score,
};

fn fixed_round() -> Round {
    let catalog = Catalog::standard();
    let target = TargetSequence::from_order(
        &catalog,
        vec![Brand::Lime, Brand::Cola, Brand::Grape, Brand::Water, Brand::Energy],
    )
    .expect("valid permutation");
    Round::with_target(catalog.active(5), target)
}

/// Any move at all, legal or not. Indices reach one past the end.
fn random_move(rng: &mut StdRng, size: usize) -> Move {
    let brand = Brand::ALL[rng.gen_range(0..Brand::ALL.len())];

    let source = if rng.gen_bool(0.5) {
        MoveSource::Inventory(brand)
    } else {
        MoveSource::Slot {
            index: rng.gen_range(0..=size),
            brand,
        }
    };
    let target = if rng.gen_bool(0.2) {
        MoveTarget::Inventory
    } else {
        MoveTarget::Slot(rng.gen_range(0..=size))
    };
    Move::new(source, target)
}

#[test]
fn test_generated_sequence_is_permutation_for_every_size() {
    let catalog = Catalog::standard();
    let mut rng = StdRng::seed_from_u64(2024);
    for size in 1..=catalog.len() {
        for _ in 0..20 {
            let target = generate_sequence(&catalog, size, &mut rng);
            let mut sorted = target.brands().to_vec();
            sorted.sort();
            let mut active = catalog.active(size).to_vec();
            active.sort();
            assert_eq!(sorted, active, "size {size}");
        }
    }
}

#[test]
fn test_generator_clamps_size() {
    let catalog = Catalog::standard();
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(generate_sequence(&catalog, 0, &mut rng).len(), 1);
    assert_eq!(generate_sequence(&catalog, 99, &mut rng).len(), 10);
}

#[test]
fn test_invariants_hold_after_random_moves() {
    let catalog = Catalog::standard();
    let mut rng = StdRng::seed_from_u64(77);

    for size in [5, 7, 10] {
        let mut round = Round::deal(&catalog, size, &mut rng);
        for _ in 0..500 {
            let mv = random_move(&mut rng, size);
            round.apply(mv);

            assert!(RoundInvariants::check_all(&round).is_ok());

            let mut expected: Vec<Brand> = round
                .active()
                .iter()
                .copied()
                .filter(|b| !round.board().contains(*b))
                .collect();
            expected.sort();
            let mut inventory = round.inventory();
            inventory.sort();
            assert_eq!(inventory, expected);
            assert_eq!(
                round.inventory().len() + round.board().placed().count(),
                size
            );
        }
    }
}

#[test]
fn test_ignored_moves_leave_board_unchanged() {
    let mut round = fixed_round();
    round.apply(Move::place(Brand::Cola, 0));
    let before = round.board().clone();

    for mv in [
        Move::place(Brand::Cola, 3),
        Move::place(Brand::Cream, 1),
        Move::place(Brand::Lime, 5),
        Move::shift(1, Brand::Lime, 2),
        Move::shift(0, Brand::Cola, 0),
        Move::new(MoveSource::Inventory(Brand::Grape), MoveTarget::Inventory),
    ] {
        let outcome = round.apply(mv);
        assert!(!outcome.is_applied(), "{mv} should be ignored");
        assert_eq!(round.board(), &before);
    }
}

#[test]
fn test_displaced_brand_returns_to_inventory() {
    let mut round = fixed_round();
    round.apply(Move::place(Brand::Lime, 0));
    let outcome = round.apply(Move::place(Brand::Cola, 0));

    assert_eq!(
        outcome,
        MoveOutcome::Placed {
            index: 0,
            displaced: Some(Brand::Lime)
        }
    );
    assert_eq!(round.board().get(0), Some(Slot::Filled(Brand::Cola)));
    assert!(round.inventory().contains(&Brand::Lime));
}

#[test]
fn test_swap_into_empty_slot_vacates_source() {
    let mut round = fixed_round();
    round.apply(Move::place(Brand::Water, 1));
    round.apply(Move::shift(1, Brand::Water, 4));
    assert_eq!(round.board().get(1), Some(Slot::Empty));
    assert_eq!(round.board().get(4), Some(Slot::Filled(Brand::Water)));
}

#[test]
fn test_partial_board_cannot_be_confirmed() {
    let mut round = fixed_round();
    round.apply(Move::place(Brand::Cola, 0));
    round.apply(Move::place(Brand::Lime, 2));

    assert!(!round.board().is_complete());
    assert!(round.confirm(Utc::now()).is_none());
    assert!(round.history().is_empty());
}

#[test]
fn test_filled_board_scores_positional_matches() {
    let mut round = fixed_round();
    round.apply(Move::place(Brand::Cola, 0));
    round.apply(Move::place(Brand::Lime, 2));
    round.apply(Move::place(Brand::Grape, 1));
    round.apply(Move::place(Brand::Water, 3));
    round.apply(Move::place(Brand::Energy, 4));

    let entry = round.confirm(Utc::now()).expect("board is full");
    assert_eq!(*entry.matches(), 2);
    assert_eq!(*entry.id(), 1);
}

#[test]
fn test_score_extremes() {
    let catalog = Catalog::standard();
    let mut rng = StdRng::seed_from_u64(5);
    for size in 2..=catalog.len() {
        let target = generate_sequence(&catalog, size, &mut rng);
        let same = Guess::new(target.brands().to_vec());
        assert_eq!(score(&same, &target), size);

        let mut rotated = target.brands().to_vec();
        rotated.rotate_left(1);
        assert_eq!(score(&Guess::new(rotated), &target), 0);
    }
}

#[test]
fn test_history_is_append_only() {
    let mut round = fixed_round();
    for (i, brand) in [Brand::Energy, Brand::Water, Brand::Grape, Brand::Lime, Brand::Cola]
        .into_iter()
        .enumerate()
    {
        round.apply(Move::place(brand, i));
    }

    let mut seen = Vec::new();
    for step in 0..4 {
        let a = round.board().get(step).and_then(Slot::brand).expect("filled");
        let b = round
            .board()
            .get(step + 1)
            .and_then(Slot::brand)
            .expect("filled");
        round.apply(Move::shift(step, a, step + 1));
        assert!(round.board().get(step) == Some(Slot::Filled(b)));

        round.confirm(Utc::now()).expect("board is full");
        assert_eq!(&round.history().entries()[..seen.len()], seen.as_slice());
        seen = round.history().entries().to_vec();
    }
    assert_eq!(round.history().len(), 4);

    let newest: Vec<u32> = round.history().newest_first().map(|e| *e.id()).collect();
    assert_eq!(newest, vec![4, 3, 2, 1]);
}
