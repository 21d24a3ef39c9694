//! Exact-position scoring.

use crate::board::Guess;
use crate::generator::TargetSequence;
use tracing::instrument;

/// Counts the positions where the guess matches the target.
///
/// Only complete guesses can be scored; an incomplete board has no [`Guess`].
#[instrument(skip(guess, target), fields(len = guess.len()))]
pub fn score(guess: &Guess, target: &TargetSequence) -> usize {
    debug_assert_eq!(guess.len(), target.len(), "guess and target must align");
    guess
        .brands()
        .iter()
        .zip(target.brands())
        .filter(|(placed, wanted)| placed == wanted)
        .count()
}

/// Checks if the guess matches the target at every position.
pub fn is_solved(guess: &Guess, target: &TargetSequence) -> bool {
    score(guess, target) == target.len()
}
