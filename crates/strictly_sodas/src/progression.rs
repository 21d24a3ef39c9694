//! Level unlocking.

use crate::catalog::Catalog;
use tracing::{info, instrument};

/// Computes the unlock frontier after a win.
///
/// Only a win exactly at the frontier advances it, and never past the
/// catalog. Replaying a level already cleared changes nothing.
#[instrument]
pub fn on_win(difficulty: usize, max_unlocked: usize, catalog_size: usize) -> usize {
    if difficulty == max_unlocked && difficulty < catalog_size {
        difficulty + 1
    } else {
        max_unlocked
    }
}

/// The highest unlocked level plus the bounds that gate selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    max_unlocked: usize,
    min_level: usize,
    catalog_size: usize,
}

impl Progression {
    /// Creates a tracker, clamping `max_unlocked` into the selectable range.
    #[instrument(skip(catalog))]
    pub fn new(catalog: &Catalog, max_unlocked: usize) -> Self {
        let min_level = catalog.min_level();
        Self {
            max_unlocked: max_unlocked.clamp(min_level, catalog.len()),
            min_level,
            catalog_size: catalog.len(),
        }
    }

    /// Highest level the player may select.
    pub fn max_unlocked(&self) -> usize {
        self.max_unlocked
    }

    /// Lowest level the player may select.
    pub fn min_level(&self) -> usize {
        self.min_level
    }

    /// Checks if `level` may be selected.
    pub fn is_selectable(&self, level: usize) -> bool {
        (self.min_level..=self.max_unlocked).contains(&level)
    }

    /// Records a win at `difficulty`. Returns the newly unlocked level, if any.
    #[instrument(skip(self), fields(max_unlocked = self.max_unlocked))]
    pub fn record_win(&mut self, difficulty: usize) -> Option<usize> {
        let next = on_win(difficulty, self.max_unlocked, self.catalog_size);
        if next > self.max_unlocked {
            info!(level = next, "Level unlocked");
            self.max_unlocked = next;
            Some(next)
        } else {
            None
        }
    }
}
