//! Game status, blocking modals and confirmation results.

use crate::history::HistoryEntry;
use crate::records::GameRecord;
use serde::{Deserialize, Serialize};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GameStatus {
    /// Moves and confirmations are accepted.
    Playing,
    /// The target was matched; waiting for a lifecycle action.
    Won,
}

/// A blocking overlay. The timer does not run while one is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Modal {
    /// How-to-play screen.
    Instructions,
    /// Level picker.
    LevelSelect,
}

/// Result of a confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// Some positions still differ.
    Attempt(HistoryEntry),
    /// Every position matched.
    Solved {
        /// The winning attempt.
        entry: HistoryEntry,
        /// The record appended for this win.
        record: GameRecord,
        /// Level unlocked by this win, if any.
        unlocked: Option<usize>,
    },
}

impl Confirmation {
    /// The attempt that was logged.
    pub fn entry(&self) -> &HistoryEntry {
        match self {
            Confirmation::Attempt(entry) => entry,
            Confirmation::Solved { entry, .. } => entry,
        }
    }

    /// Checks if this confirmation won the game.
    pub fn is_solved(&self) -> bool {
        matches!(self, Confirmation::Solved { .. })
    }
}
