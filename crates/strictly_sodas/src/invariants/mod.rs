//! First-class invariants for a round.
//!
//! Invariants are logical properties that must hold after every move and
//! every confirmation. They are testable independently and document what the
//! engine guarantees.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples so sets compose at the type level.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

type Check<S> = (fn(&S) -> bool, fn() -> &'static str);

fn collect<S>(checks: &[Check<S>], state: &S) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<InvariantViolation> = checks
        .iter()
        .filter(|(holds, _)| !holds(state))
        .map(|(_, description)| InvariantViolation::new(description()))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(
            &[
                (I1::holds, I1::description),
                (I2::holds, I2::description),
            ],
            state,
        )
    }
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(
            &[
                (I1::holds, I1::description),
                (I2::holds, I2::description),
                (I3::holds, I3::description),
                (I4::holds, I4::description),
            ],
            state,
        )
    }
}

pub mod active_subset;
pub mod history_scores;
pub mod target_permutation;
pub mod unique_placement;

pub use active_subset::ActiveSubsetInvariant;
pub use history_scores::HistoryScoresInvariant;
pub use target_permutation::TargetPermutationInvariant;
pub use unique_placement::UniquePlacementInvariant;

/// All round invariants as a composable set.
pub type RoundInvariants = (
    UniquePlacementInvariant,
    ActiveSubsetInvariant,
    HistoryScoresInvariant,
    TargetPermutationInvariant,
);

/// The invariants a single move can affect.
pub type BoardInvariants = (UniquePlacementInvariant, ActiveSubsetInvariant);
