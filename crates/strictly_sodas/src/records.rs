//! Completed-game records and their leaderboard ordering.

use crate::catalog::Brand;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Summary of a solved game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct GameRecord {
    /// Creation time in milliseconds, used as a display key.
    id: u64,
    /// When the game was won.
    timestamp: DateTime<Utc>,
    /// Attempts it took.
    attempts: usize,
    /// Seconds from deal to solve, excluding paused time.
    duration_secs: u64,
    /// Difficulty played.
    difficulty: usize,
    /// The solved target sequence.
    solution: Vec<Brand>,
}

impl GameRecord {
    /// Leaderboard order: harder first, then fewer attempts, then faster.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .difficulty
            .cmp(&self.difficulty)
            .then(self.attempts.cmp(&other.attempts))
            .then(self.duration_secs.cmp(&other.duration_secs))
    }
}

/// Append-only collection of records, kept in the order they were won.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBook {
    records: Vec<GameRecord>,
}

impl RecordBook {
    /// Creates a book from stored records, preserving their order.
    pub fn new(records: Vec<GameRecord>) -> Self {
        Self { records }
    }

    /// Appends a record.
    #[instrument(skip(self, record), fields(difficulty = record.difficulty, attempts = record.attempts))]
    pub fn append(&mut self, record: GameRecord) {
        debug!(total = self.records.len() + 1, "Appending game record");
        self.records.push(record);
    }

    /// Records in append order.
    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in leaderboard order. Equal records keep their append order.
    pub fn ranked(&self) -> Vec<&GameRecord> {
        let mut ranked: Vec<&GameRecord> = self.records.iter().collect();
        ranked.sort_by(|a, b| a.rank_cmp(b));
        ranked
    }

    /// Best record at a given difficulty.
    pub fn best_at(&self, difficulty: usize) -> Option<&GameRecord> {
        self.records
            .iter()
            .filter(|r| r.difficulty == difficulty)
            .min_by(|a, b| a.rank_cmp(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, difficulty: usize, attempts: usize, duration_secs: u64) -> GameRecord {
        GameRecord::new(id, Utc::now(), attempts, duration_secs, difficulty, Vec::new())
    }

    #[test]
    fn test_ranked_orders_by_difficulty_attempts_duration() {
        let book = RecordBook::new(vec![
            record(1, 5, 3, 40),
            record(2, 6, 9, 300),
            record(3, 5, 3, 20),
            record(4, 5, 2, 90),
        ]);

        let ids: Vec<u64> = book.ranked().iter().map(|r| *r.id()).collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_ranking_does_not_reorder_storage() {
        let book = RecordBook::new(vec![record(1, 5, 9, 9), record(2, 7, 1, 1)]);
        let _ = book.ranked();
        let ids: Vec<u64> = book.records().iter().map(|r| *r.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_ties_keep_append_order() {
        let book = RecordBook::new(vec![record(1, 5, 3, 30), record(2, 5, 3, 30)]);
        let ids: Vec<u64> = book.ranked().iter().map(|r| *r.id()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_best_at_difficulty() {
        let mut book = RecordBook::default();
        book.append(record(1, 5, 4, 10));
        book.append(record(2, 5, 2, 50));
        book.append(record(3, 6, 1, 5));
        assert_eq!(book.best_at(5).map(|r| *r.id()), Some(2));
        assert!(book.best_at(9).is_none());
    }
}
