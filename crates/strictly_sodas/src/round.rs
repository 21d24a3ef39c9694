//! State of one game from deal to solve.

use crate::action::{Move, MoveOutcome};
use crate::board::SlotBoard;
use crate::catalog::{Brand, Catalog};
use crate::executor;
use crate::generator::{TargetSequence, generate_sequence};
use crate::history::{HistoryEntry, HistoryLog};
use crate::scorer;
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::instrument;

/// Everything that belongs to a single game: target, board and attempts.
///
/// A new round is dealt on every start, retry, advance or level change;
/// nothing carries over.
#[derive(Debug, Clone)]
pub struct Round {
    pub(crate) active: &'static [Brand],
    pub(crate) target: TargetSequence,
    pub(crate) board: SlotBoard,
    pub(crate) history: HistoryLog,
}

impl Round {
    /// Deals a fresh round at the given difficulty.
    #[instrument(skip(catalog, rng))]
    pub fn deal<R>(catalog: &Catalog, size: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let active = catalog.active(size);
        let target = generate_sequence(catalog, active.len(), rng);
        Self::with_target(active, target)
    }

    /// Starts a round against a known target.
    pub fn with_target(active: &'static [Brand], target: TargetSequence) -> Self {
        debug_assert_eq!(active.len(), target.len(), "target must cover the active set");
        Self {
            active,
            board: SlotBoard::new(active.len()),
            target,
            history: HistoryLog::new(),
        }
    }

    /// Difficulty of this round.
    pub fn size(&self) -> usize {
        self.active.len()
    }

    /// Brands in play.
    pub fn active(&self) -> &'static [Brand] {
        self.active
    }

    /// The player's board.
    pub fn board(&self) -> &SlotBoard {
        &self.board
    }

    /// Attempts so far.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Hidden target. Crate-internal: presentation only sees it once solved.
    pub(crate) fn target(&self) -> &TargetSequence {
        &self.target
    }

    /// Unplaced active brands.
    pub fn inventory(&self) -> Vec<Brand> {
        self.board.inventory(self.active)
    }

    /// Applies a move through the executor.
    pub fn apply(&mut self, mv: Move) -> MoveOutcome {
        executor::execute(self, mv)
    }

    /// Scores the board and logs the attempt.
    ///
    /// Returns `None` while any slot is empty; nothing is recorded.
    #[instrument(skip(self))]
    pub fn confirm(&mut self, at: DateTime<Utc>) -> Option<&HistoryEntry> {
        let guess = self.board.guess()?;
        let matches = scorer::score(&guess, &self.target);
        Some(self.history.record(guess, matches, at))
    }
}
