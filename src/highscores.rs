//! High score leaderboard
//!
//! Tracks the top 10 scores across sessions within one process run. Session
//! state is in-memory only; nothing is persisted to disk.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final session score
    pub score: u32,
    /// Frames the session survived
    pub frames: u64,
    /// Session seed, for replaying the run
    pub seed: u64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a finished session (if it qualifies).
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify.
    pub fn add_score(&mut self, score: u32, frames: u64, seed: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            frames,
            seed,
        };

        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_ranking_stays_sorted() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(10, 600, 1), Some(1));
        assert_eq!(scores.add_score(30, 900, 2), Some(1));
        assert_eq!(scores.add_score(20, 700, 3), Some(2));
        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![30, 20, 10]);
        assert_eq!(scores.top_score(), Some(30));
    }

    #[test]
    fn test_table_truncates_to_capacity() {
        let mut scores = HighScores::new();
        for s in 1..=20u32 {
            scores.add_score(s, 0, s as u64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        // The lowest survivor is 20 - 10 + 1
        assert_eq!(scores.entries.last().map(|e| e.score), Some(11));
        assert!(!scores.qualifies(5));
    }
}
