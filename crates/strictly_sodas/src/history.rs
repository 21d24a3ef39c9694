//! Append-only log of confirmed attempts.

use crate::board::Guess;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One confirmed attempt.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Attempt number, starting at 1.
    id: u32,
    /// The board exactly as it was confirmed.
    snapshot: Guess,
    /// Positions that matched the target.
    matches: usize,
    /// When the attempt was confirmed.
    created_at: DateTime<Utc>,
}

/// Attempts of the current game, in the order they were made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an attempt and returns the stored entry.
    #[instrument(skip(self, snapshot), fields(attempt = self.entries.len() + 1))]
    pub fn record(
        &mut self,
        snapshot: Guess,
        matches: usize,
        created_at: DateTime<Utc>,
    ) -> &HistoryEntry {
        let id = u32::try_from(self.entries.len() + 1).unwrap_or(u32::MAX);
        debug!(id, matches, "Recording attempt");
        self.entries.push(HistoryEntry {
            id,
            snapshot,
            matches,
            created_at,
        });
        &self.entries[self.entries.len() - 1]
    }

    /// Number of attempts so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if no attempts were made.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in chronological order.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries newest first, for display.
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// The most recent attempt.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Brand;

    #[test]
    fn test_record_assigns_sequential_ids() {
        let mut log = HistoryLog::new();
        let now = Utc::now();
        log.record(Guess::new(vec![Brand::Cola, Brand::Lime]), 0, now);
        log.record(Guess::new(vec![Brand::Lime, Brand::Cola]), 2, now);

        let ids: Vec<u32> = log.entries().iter().map(|e| *e.id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_newest_first_reverses_view_only() {
        let mut log = HistoryLog::new();
        let now = Utc::now();
        log.record(Guess::new(vec![Brand::Cola]), 0, now);
        log.record(Guess::new(vec![Brand::Cola]), 1, now);

        let newest: Vec<usize> = log.newest_first().map(|e| *e.matches()).collect();
        assert_eq!(newest, vec![1, 0]);
        assert_eq!(*log.entries()[0].matches(), 0);
    }

    #[test]
    fn test_prior_entries_unchanged_by_append() {
        let mut log = HistoryLog::new();
        let now = Utc::now();
        log.record(Guess::new(vec![Brand::Grape]), 1, now);
        let first = log.entries()[0].clone();
        log.record(Guess::new(vec![Brand::Grape]), 0, now);
        assert_eq!(log.entries()[0], first);
    }
}
