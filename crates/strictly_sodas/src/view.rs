//! Read-only snapshot handed to presentation.

use crate::board::SlotBoard;
use crate::catalog::Brand;
use crate::history::HistoryEntry;
use crate::status::{GameStatus, Modal};
use derive_getters::Getters;
use derive_new::new;

/// Everything a renderer needs for one frame.
///
/// The target is only present once the game is won.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct GameView {
    board: SlotBoard,
    target: Option<Vec<Brand>>,
    inventory: Vec<Brand>,
    /// Attempts, newest first.
    history: Vec<HistoryEntry>,
    status: GameStatus,
    elapsed_secs: u64,
    difficulty: usize,
    max_unlocked: usize,
    min_level: usize,
    catalog_size: usize,
    modal: Option<Modal>,
    can_confirm: bool,
    can_advance: bool,
}

impl GameView {
    /// Elapsed time as `m:ss`.
    pub fn clock_label(&self) -> String {
        format!("{}:{:02}", self.elapsed_secs / 60, self.elapsed_secs % 60)
    }

    /// Levels that can be chosen, with their lock state.
    pub fn levels(&self) -> impl Iterator<Item = (usize, bool)> + '_ {
        (self.min_level..=self.catalog_size).map(|level| (level, level <= self.max_unlocked))
    }
}
