//! Best score per player
//!
//! Keeps one entry per player name and never lowers a stored score. Storage
//! is left to the caller; the table serializes with serde.

use serde::{Deserialize, Serialize};

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: i64,
}

/// High score table, kept sorted by descending score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty table
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Stored score for a player
    pub fn score_of(&self, name: &str) -> Option<i64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.score)
    }

    /// Save a player's score unless a higher one is already stored.
    /// Returns whether the table changed.
    pub fn save_score(&mut self, name: &str, score: i64) -> bool {
        if let Some(existing) = self.score_of(name) {
            if existing > score {
                return false;
            }
            self.entries.retain(|e| e.name != name);
        }

        let entry = HighScoreEntry {
            name: name.to_string(),
            score,
        };

        // Find insertion point (sorted descending by score)
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        log::debug!("Saved score {} for {}", score, name);
        true
    }

    /// Rank (1-indexed) a score would take in the table
    pub fn potential_rank(&self, score: i64) -> usize {
        self.entries.iter().position(|e| score > e.score).unwrap_or(self.entries.len()) + 1
    }

    /// Entries from best to worst
    pub fn sorted(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut scores: Self = serde_json::from_str(json)?;
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(scores)
    }
}
